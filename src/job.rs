use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rand::Rng;

use crate::error::{Error, Result};
use crate::label::{generate_weight, render, CommandStream, LabelContent, LabelSize, LayoutPlan, LayoutTuning};
use crate::printer::{PrintSink, JOB_NAME};

/// What the operator typed on the main form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRequest {
    pub description: String,
    pub operator: String,
    pub origin: String,
    pub destination: String,
}

impl LabelRequest {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::MissingField("description"));
        }
        Ok(())
    }
}

/// Lays out one label. Fails only on an invalid request or label size.
pub fn build_label(
    request: &LabelRequest,
    size: LabelSize,
    weight: String,
    now: &DateTime<Tz>,
    tuning: &LayoutTuning,
) -> Result<CommandStream> {
    request.validate()?;
    let dims = size.dimensions()?;
    let plan = LayoutPlan::compute(dims, tuning);

    let content = LabelContent::stamped(
        &request.description,
        &request.operator,
        &request.origin,
        &request.destination,
        weight,
        now,
    );
    Ok(render(&content.fields(), &plan))
}

/// Weighs, stamps, lays out and prints one label. The stream is returned for display; it is not
/// resent if the printer fails.
pub fn print_label<R: Rng + ?Sized>(
    request: &LabelRequest,
    size: LabelSize,
    sink: &dyn PrintSink,
    timezone: Tz,
    rng: &mut R,
) -> Result<CommandStream> {
    let weight = generate_weight(rng);
    let now = Utc::now().with_timezone(&timezone);

    let stream = build_label(request, size, weight, &now, &LayoutTuning::default())?;
    log::debug!("ZPL for {size}:\n{stream}");

    sink.send(JOB_NAME, stream.as_bytes())?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::testing::RecordingSink;
    use chrono::TimeZone;
    use chrono_tz::America::Mexico_City;
    use rand::{rngs::StdRng, SeedableRng};

    fn request() -> LabelRequest {
        LabelRequest {
            description: "Bolsa de Carton".into(),
            operator: "Luis".into(),
            origin: "Linea 2".into(),
            destination: "Embarques".into(),
        }
    }

    #[test]
    fn builds_default_label() {
        let now = Mexico_City.with_ymd_and_hms(2024, 7, 15, 9, 5, 0).unwrap();
        let stream = build_label(&request(), LabelSize::default(), "250.500".into(), &now, &LayoutTuning::default())
            .unwrap();

        let lines: Vec<&str> = stream.as_str().lines().collect();
        assert_eq!(lines[0], "^XA");
        assert!(!stream.as_str().contains("^FWR"));
        assert_eq!(lines[3], "^FO18,28^FDDescripción: Bolsa de Carton^FS");
        assert!(lines.contains(&"^FO18,188^FDPeso: 250.500 kg^FS"));
        assert!(lines.contains(&"^FO18,228^FDFecha: 2024-07-15^FS"));
        assert!(lines.contains(&"^FO18,268^FDHora: 09:05:00^FS"));
    }

    #[test]
    fn narrow_label_is_rotated() {
        let now = Mexico_City.with_ymd_and_hms(2024, 7, 15, 9, 5, 0).unwrap();
        let stream = build_label(
            &request(),
            LabelSize::new(25.0, 76.0),
            "250.500".into(),
            &now,
            &LayoutTuning::default(),
        )
        .unwrap();
        assert_eq!(stream.as_str().lines().nth(1), Some("^FWR"));
    }

    #[test]
    fn missing_description_is_rejected() {
        let now = Mexico_City.with_ymd_and_hms(2024, 7, 15, 9, 5, 0).unwrap();
        let request = LabelRequest { description: "  ".into(), ..request() };
        let result = build_label(&request, LabelSize::default(), "100.000".into(), &now, &LayoutTuning::default());
        assert!(matches!(result, Err(Error::MissingField(_))));
    }

    #[test]
    fn invalid_size_is_rejected_before_layout() {
        let now = Mexico_City.with_ymd_and_hms(2024, 7, 15, 9, 5, 0).unwrap();
        let result = build_label(&request(), LabelSize::new(0.0, 51.0), "100.000".into(), &now, &LayoutTuning::default());
        assert!(matches!(result, Err(Error::InvalidSize(_))));
    }

    #[test]
    fn print_sends_stream_verbatim() {
        let sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(42);
        let stream = print_label(&request(), LabelSize::default(), &sink, Mexico_City, &mut rng).unwrap();

        let jobs = sink.jobs.borrow();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].0, JOB_NAME);
        assert_eq!(jobs[0].1, stream.as_bytes());
        assert!(stream.as_str().ends_with("^XZ"));
    }

    #[test]
    fn print_failure_is_reported() {
        let sink = RecordingSink {
            fail_with: Some("printer offline".into()),
            ..RecordingSink::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = print_label(&request(), LabelSize::default(), &sink, Mexico_City, &mut rng);
        assert!(matches!(result, Err(Error::Print(msg)) if msg == "printer offline"));
        assert!(sink.jobs.borrow().is_empty());
    }

    #[test]
    fn invalid_request_never_reaches_printer() {
        let sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(3);
        let request = LabelRequest::default();
        assert!(print_label(&request, LabelSize::default(), &sink, Mexico_City, &mut rng).is_err());
        assert!(sink.jobs.borrow().is_empty());
    }
}
