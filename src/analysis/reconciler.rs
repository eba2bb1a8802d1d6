use crate::domain::ModelTarget;

use super::state::RequestState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Malicious,
    Safe,
}

impl Verdict {
    pub fn from_prediction(prediction: i64) -> Self {
        if prediction == 1 {
            Verdict::Malicious
        } else {
            Verdict::Safe
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Malicious => "🚨 Phishing / Spam Detected",
            Verdict::Safe => "✅ Safe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Verdict {
        verdict: Verdict,
        confidence: String,
        model_label: String,
    },
    Error {
        message: String,
    },
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub loading: bool,
    pub inputs_locked: bool,
    pub trigger_enabled: bool,
    pub banner: Option<Banner>,
}

pub fn reconcile(state: &RequestState) -> ViewModel {
    let pending = state.is_pending();
    let banner = match state {
        RequestState::Idle | RequestState::Pending => None,
        RequestState::Succeeded(result) => Some(Banner::Verdict {
            verdict: Verdict::from_prediction(result.prediction),
            confidence: format_confidence(result.confidence),
            model_label: model_label(&result.model_type),
        }),
        RequestState::Failed(message) => Some(Banner::Error {
            message: message.clone(),
        }),
    };

    ViewModel {
        loading: pending,
        inputs_locked: pending,
        trigger_enabled: !pending,
        banner,
    }
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Human label for a reported model type; unknown types are shown verbatim.
pub fn model_label(model_type: &str) -> String {
    match model_type.parse::<ModelTarget>() {
        Ok(target) if target.path_segment() == model_type => target.label().to_string(),
        _ => model_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassificationResult;

    fn succeeded(prediction: i64, confidence: f64, model: &str) -> RequestState {
        RequestState::Succeeded(ClassificationResult {
            prediction,
            confidence,
            model_type: model.to_string(),
        })
    }

    #[test]
    fn idle_has_no_banner() {
        let view = reconcile(&RequestState::Idle);
        assert_eq!(
            view,
            ViewModel {
                loading: false,
                inputs_locked: false,
                trigger_enabled: true,
                banner: None,
            }
        );
    }

    #[test]
    fn pending_locks_inputs_and_trigger() {
        let view = reconcile(&RequestState::Pending);
        assert!(view.loading);
        assert!(view.inputs_locked);
        assert!(!view.trigger_enabled);
        assert_eq!(view.banner, None);
    }

    #[test]
    fn confidence_has_two_decimals() {
        assert_eq!(format_confidence(0.8765), "87.65%");
        assert_eq!(format_confidence(0.9321), "93.21%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn only_prediction_one_is_malicious() {
        assert_eq!(Verdict::from_prediction(1), Verdict::Malicious);
        assert_eq!(Verdict::from_prediction(0), Verdict::Safe);
        assert_eq!(Verdict::from_prediction(2), Verdict::Safe);
        assert_eq!(Verdict::from_prediction(-1), Verdict::Safe);
    }

    #[test]
    fn success_renders_verdict_banner() {
        let view = reconcile(&succeeded(1, 0.9321, "url"));
        assert!(view.trigger_enabled);
        assert_eq!(
            view.banner,
            Some(Banner::Verdict {
                verdict: Verdict::Malicious,
                confidence: "93.21%".to_string(),
                model_label: "URL Detector".to_string(),
            })
        );
    }

    #[test]
    fn unknown_model_type_passes_through() {
        assert_eq!(model_label("email"), "Email Detector");
        assert_eq!(model_label("umpire"), "Umpire Model");
        assert_eq!(model_label("sms-v2"), "sms-v2");
        assert_eq!(model_label("URL"), "URL");

        let view = reconcile(&succeeded(0, 0.5, "sms-v2"));
        assert!(matches!(
            view.banner,
            Some(Banner::Verdict { model_label: ref label, verdict: Verdict::Safe, .. }) if label == "sms-v2"
        ));
    }

    #[test]
    fn failure_shows_message() {
        let view = reconcile(&RequestState::Failed("boom".to_string()));
        assert_eq!(
            view.banner,
            Some(Banner::Error {
                message: "boom".to_string()
            })
        );
    }

    #[test]
    fn reconcile_is_deterministic() {
        let states = [
            RequestState::Idle,
            RequestState::Pending,
            succeeded(1, 0.8765, "email"),
            RequestState::Failed("x".to_string()),
        ];
        for state in &states {
            assert_eq!(reconcile(state), reconcile(state));
        }
    }
}
