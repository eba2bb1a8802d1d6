use crate::{
    analysis::{Banner, ViewModel},
    domain::{HealthReport, ModelTarget},
};

pub fn render_view(view: &ViewModel) -> Option<String> {
    if view.loading {
        return Some("⏳ Analyzing...".to_string());
    }
    match &view.banner {
        None => None,
        Some(Banner::Error { message }) => Some(message.clone()),
        Some(Banner::Verdict {
            verdict,
            confidence,
            model_label,
        }) => Some(format!(
            "{}\n  Confidence: {confidence}\n  Model: {model_label}",
            verdict.headline()
        )),
    }
}

pub fn render_model(target: ModelTarget) -> String {
    format!("Detection model: {} ({target})", target.label())
}

pub fn render_health(report: &HealthReport) -> String {
    let models = if report.models_loaded.is_empty() {
        "none".to_string()
    } else {
        report.models_loaded.join(", ")
    };
    format!("Server status: {}\n  Models loaded: {models}", report.status)
}
