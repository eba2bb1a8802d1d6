pub mod dispatcher;
pub mod reconciler;
mod selector;
mod session;
pub mod state;
pub mod validator;

pub use dispatcher::UNREACHABLE_MESSAGE;
pub use reconciler::{Banner, ViewModel};
pub use session::{AnalysisSession, SubmitError};
