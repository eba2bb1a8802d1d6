use std::{
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::timeout,
};

use crate::{
    analysis::{
        dispatcher::InFlight, validator::ValidationError, AnalysisSession, SubmitError,
        UNREACHABLE_MESSAGE,
    },
    config::AppConfig,
    detector::DetectorClient,
    infrastructure::shutdown::{Shutdown, ShutdownListener},
    terminal::{self, render_health, render_model, render_view, Command, PasteBuffer},
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// What the shell does after handling one line of input.
enum Next {
    Prompt,
    /// A state transition is on its way and will redraw the prompt.
    AwaitState,
    Quit,
}

pub struct PhishAiApp {
    client: Arc<DetectorClient>,
    session: AnalysisSession<DetectorClient>,
    shutdown: Shutdown,
    paste: Option<PasteBuffer>,
    in_flight: Option<InFlight>,
}

impl PhishAiApp {
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("phishai/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        let client = Arc::new(DetectorClient::new(http_client, config.detector.clone()));
        let session = AnalysisSession::new(Arc::clone(&client), config.default_model);

        tracing::info!(
            target: "shell",
            base_url = %config.detector.base_url,
            model = %config.default_model,
            timeout = ?config.detector.request_timeout,
            "PhishAI client ready"
        );

        Ok(Self {
            client,
            session,
            shutdown,
            paste: None,
            in_flight: None,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        println!("PhishAI: AI-powered phishing detector for emails and URLs");
        println!("{}", terminal::HELP);
        println!("{}", render_model(self.session.current_model()));
        self.prompt();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut states = self.session.subscribe();
        let mut stop = self.shutdown.subscribe();

        loop {
            tokio::select! {
                _ = stop.notified() => break,
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    states.borrow_and_update();
                    let view = self.session.view();
                    if let Some(text) = render_view(&view) {
                        println!("{text}");
                    }
                    if !view.loading {
                        self.prompt();
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read from stdin")? else {
                        if let Some(mut buffer) = self.paste.take() {
                            self.accept_input(buffer.finish());
                        }
                        break;
                    };
                    let next = match self.paste.as_mut() {
                        Some(buffer) => match buffer.push(&line) {
                            Some(text) => {
                                self.paste = None;
                                self.accept_input(text)
                            }
                            None => Next::Prompt,
                        },
                        None => self.handle_line(&line, &mut stop).await,
                    };
                    match next {
                        Next::Prompt => self.prompt(),
                        Next::AwaitState => {}
                        Next::Quit => break,
                    }
                }
            }
        }

        self.shutdown.trigger("shell closed");
        self.settle_pending().await;
        println!();
        println!("Protected by PhishAI. Always verify suspicious content.");
        Ok(())
    }

    async fn handle_line(&mut self, line: &str, stop: &mut ShutdownListener) -> Next {
        let command = match terminal::parse(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return Next::Prompt;
            }
        };
        tracing::debug!(target: "shell", ?command, "command received");

        match command {
            Command::Analyze(text) => self.accept_input(text),
            Command::Blank => {
                println!("{}", ValidationError::EmptyInput);
                Next::Prompt
            }
            Command::Paste => {
                if self.session.is_pending() {
                    println!("Input is locked while a request is pending; use /reset to abandon it.");
                } else {
                    println!("Paste the content, then finish with a line containing only `.`");
                    self.paste = Some(PasteBuffer::default());
                }
                Next::Prompt
            }
            Command::Resubmit => {
                tracing::debug!(
                    target: "shell",
                    chars = self.session.input().chars().count(),
                    "resubmitting current input"
                );
                self.submit()
            }
            Command::ShowModel => {
                println!("{}", render_model(self.session.current_model()));
                Next::Prompt
            }
            Command::SelectModel(target) => {
                if self.session.is_pending() {
                    println!("The detection model cannot change while a request is pending.");
                } else {
                    self.session.select(target);
                    println!("{}", render_model(target));
                }
                Next::Prompt
            }
            Command::Health => {
                tokio::select! {
                    result = self.client.health() => match result {
                        Ok(report) => println!("{}", render_health(&report)),
                        Err(err) => {
                            tracing::warn!(target: "detector", error = %err, "health check failed");
                            println!("{UNREACHABLE_MESSAGE}");
                        }
                    },
                    _ = stop.notified() => return Next::Quit,
                }
                Next::Prompt
            }
            Command::Reset => {
                self.session.reset();
                Next::AwaitState
            }
            Command::Help => {
                println!("{}", terminal::HELP);
                Next::Prompt
            }
            Command::Quit => Next::Quit,
        }
    }

    fn accept_input(&mut self, text: String) -> Next {
        if self.session.is_pending() {
            println!("Input is locked while a request is pending; use /reset to abandon it.");
            return Next::Prompt;
        }
        self.session.set_input(text);
        self.submit()
    }

    fn submit(&mut self) -> Next {
        match self.session.submit() {
            Ok(in_flight) => {
                tracing::debug!(target: "shell", token = %in_flight.token(), "submission accepted");
                self.in_flight = Some(in_flight);
                Next::AwaitState
            }
            Err(SubmitError::Invalid(err)) => {
                println!("{err}");
                Next::Prompt
            }
            Err(SubmitError::Busy(err)) => {
                println!("Still analyzing: {err}. Use /reset to abandon it.");
                Next::Prompt
            }
        }
    }

    /// Gives a request still pending at exit a short grace period so its outcome is logged.
    async fn settle_pending(&mut self) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        if !self.session.is_pending() {
            return;
        }
        let token = in_flight.token();
        match timeout(SHUTDOWN_GRACE, in_flight.wait()).await {
            Ok(completion) => {
                tracing::info!(target: "shell", %token, ?completion, "pending request settled before exit");
            }
            Err(_) => {
                tracing::warn!(
                    target: "shell",
                    %token,
                    "pending request did not finish within {:?}; abandoning it",
                    SHUTDOWN_GRACE
                );
            }
        }
    }

    fn prompt(&self) {
        if self.paste.is_some() {
            print!("... ");
        } else {
            print!("[{}] > ", self.session.current_model());
        }
        let _ = io::stdout().flush();
    }
}
