use crate::error::{Error, Result};

pub const JOB_NAME: &str = "Etiqueta";

/// Destination for finished command streams.
pub trait PrintSink {
    fn send(&self, job_name: &str, payload: &[u8]) -> Result<()>;
}

/// Raw passthrough to an OS print queue; the printer itself interprets the payload.
#[derive(Debug, Clone, Default)]
pub struct SystemPrinter {
    /// Queue name; `None` uses the system default.
    pub printer: Option<String>,
}

impl SystemPrinter {
    pub fn new(printer: Option<String>) -> Self {
        Self { printer }
    }
}

impl PrintSink for SystemPrinter {
    fn send(&self, job_name: &str, payload: &[u8]) -> Result<()> {
        log::info!(
            "sending {} bytes to {}",
            payload.len(),
            self.printer.as_deref().unwrap_or("default printer")
        );
        send_raw(self.printer.as_deref(), job_name, payload).map_err(Error::Print)
    }
}

#[cfg(not(windows))]
fn send_raw(printer: Option<&str>, job_name: &str, payload: &[u8]) -> std::result::Result<(), String> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut command = Command::new("lp");
    command.args(["-s", "-o", "raw", "-t", job_name]);
    if let Some(name) = printer {
        command.args(["-d", name]);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to start lp: {e}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(payload).map_err(|e| format!("failed to write job to lp: {e}"))?;
    }

    let output = child.wait_with_output().map_err(|e| format!("lp did not finish: {e}"))?;
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("lp exited with {}: {}", output.status, stderr.trim()))
    }
}

#[cfg(windows)]
fn send_raw(printer: Option<&str>, job_name: &str, payload: &[u8]) -> std::result::Result<(), String> {
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::ptr::null_mut;
    use winapi::shared::minwindef::DWORD;
    use winapi::um::winnt::HANDLE;
    use winapi::um::winspool::{
        ClosePrinter, EndDocPrinter, EndPagePrinter, OpenPrinterW, StartDocPrinterW, StartPagePrinter,
        WritePrinter, DOC_INFO_1W,
    };

    fn wide(text: &str) -> Vec<u16> {
        OsStr::new(text).encode_wide().chain(once(0)).collect()
    }

    let mut name = match printer {
        Some(name) => wide(name),
        None => default_printer()?,
    };
    let mut doc_name = wide(job_name);
    let mut data_type = wide("RAW");

    unsafe {
        let mut handle: HANDLE = null_mut();
        if OpenPrinterW(name.as_mut_ptr(), &mut handle, null_mut()) == 0 {
            return Err(format!("could not open printer: {}", last_error_string()));
        }

        let mut doc_info = DOC_INFO_1W {
            pDocName: doc_name.as_mut_ptr(),
            pOutputFile: null_mut(),
            pDatatype: data_type.as_mut_ptr(),
        };

        if StartDocPrinterW(handle, 1, &mut doc_info as *mut DOC_INFO_1W as *mut u8) == 0 {
            let msg = last_error_string();
            ClosePrinter(handle);
            return Err(format!("could not start print job: {msg}"));
        }

        if StartPagePrinter(handle) == 0 {
            let msg = last_error_string();
            EndDocPrinter(handle);
            ClosePrinter(handle);
            return Err(format!("could not start page: {msg}"));
        }

        let mut written: DWORD = 0;
        let ok = WritePrinter(
            handle,
            payload.as_ptr() as *mut _,
            payload.len() as DWORD,
            &mut written,
        );
        let write_error = if ok == 0 { Some(last_error_string()) } else { None };

        EndPagePrinter(handle);
        EndDocPrinter(handle);
        ClosePrinter(handle);

        if let Some(msg) = write_error {
            return Err(format!("write failed after {written} of {} bytes: {msg}", payload.len()));
        }
        if written as usize != payload.len() {
            return Err(format!("partial write: {written} of {} bytes", payload.len()));
        }
    }

    Ok(())
}

#[cfg(windows)]
fn default_printer() -> std::result::Result<Vec<u16>, String> {
    use winapi::shared::minwindef::DWORD;
    use winapi::um::winspool::GetDefaultPrinterW;

    let mut len: DWORD = 0;
    unsafe {
        GetDefaultPrinterW(std::ptr::null_mut(), &mut len);
        if len == 0 {
            return Err(format!("no default printer: {}", last_error_string()));
        }

        let mut buffer = vec![0u16; len as usize];
        if GetDefaultPrinterW(buffer.as_mut_ptr(), &mut len) == 0 {
            return Err(format!("no default printer: {}", last_error_string()));
        }
        Ok(buffer)
    }
}

#[cfg(windows)]
fn last_error_string() -> String {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::winbase::{FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS};

    unsafe {
        let err = GetLastError();
        if err == 0 {
            return "unknown error".to_owned();
        }

        let mut buf = [0u16; 512];
        let len = FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            std::ptr::null(),
            err,
            0,
            buf.as_mut_ptr(),
            buf.len() as u32,
            std::ptr::null_mut(),
        );
        if len == 0 {
            return format!("OS error {err}");
        }

        let text = OsString::from_wide(&buf[..len as usize]).to_string_lossy().into_owned();
        format!("{} (code {err})", text.trim())
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;

    use super::PrintSink;
    use crate::error::{Error, Result};

    /// Keeps every job instead of printing it; optionally fails like an offline printer.
    #[derive(Default)]
    pub struct RecordingSink {
        pub jobs: RefCell<Vec<(String, Vec<u8>)>>,
        pub fail_with: Option<String>,
    }

    impl PrintSink for RecordingSink {
        fn send(&self, job_name: &str, payload: &[u8]) -> Result<()> {
            if let Some(message) = &self.fail_with {
                return Err(Error::Print(message.clone()));
            }
            self.jobs.borrow_mut().push((job_name.to_owned(), payload.to_vec()));
            Ok(())
        }
    }
}
