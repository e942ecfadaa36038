use prometheus::{Encoder, GaugeVec, IntGauge, Opts, Registry, TextEncoder};

use crate::types::{MetricFamily, Snapshot};

const NAMESPACE: &str = "opa_scorecard";

/// Render a snapshot in the Prometheus text exposition format.
///
/// The registry is rebuilt per call from the immutable snapshot, so a
/// scrape never observes samples from two different cycles. The `up`
/// gauge is fixed at 1 while the process serves, independent of whether
/// the last poll cycle succeeded.
pub fn render(snapshot: &Snapshot) -> Result<String, prometheus::Error> {
    let registry = Registry::new();

    let up = IntGauge::with_opts(
        Opts::new("up", "Was the last OPA scorecard query successful.").namespace(NAMESPACE),
    )?;
    up.set(1);
    registry.register(Box::new(up))?;

    let violations = family_gauge(&registry, MetricFamily::ConstraintViolation)?;
    let information = family_gauge(&registry, MetricFamily::ConstraintInformation)?;

    for sample in &snapshot.samples {
        let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
        let gauge = match sample.family {
            MetricFamily::ConstraintViolation => &violations,
            MetricFamily::ConstraintInformation => &information,
        };
        gauge.get_metric_with_label_values(&values)?.set(sample.value);
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
}

fn family_gauge(registry: &Registry, family: MetricFamily) -> Result<GaugeVec, prometheus::Error> {
    let gauge = GaugeVec::new(
        Opts::new(family.name(), family.help()).namespace(NAMESPACE),
        family.label_names(),
    )?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}
