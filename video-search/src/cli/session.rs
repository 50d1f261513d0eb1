//! Search sessions driven from the terminal
//!
//! A session owns the controller and renders every state change it is told
//! about. In interactive mode each line typed becomes the query text and is
//! submitted right away; a line entered while a search is still pending
//! supersedes it.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{SearchController, Settled};
use crate::events::StateReceiver;
use crate::output::{write_state, OutputEvent, OutputWriter};
use crate::state::SearchState;

/// A controller plus the output it renders to
pub struct Session {
    controller: SearchController,
    changes: StateReceiver,
    output: Box<dyn OutputWriter>,
    show_prompt: bool,
}

impl Session {
    /// Create a new session around `controller`
    pub fn new(mut controller: SearchController, output: Box<dyn OutputWriter>) -> Self {
        let changes = controller.subscribe();
        Self {
            controller,
            changes,
            output,
            show_prompt: true,
        }
    }

    /// Show the input prompt in interactive mode (off when stdin is piped)
    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    /// Search for `query` once and wait for its outcome
    pub async fn run_once(&mut self, query: &str) -> SearchState {
        self.controller.set_query_text(query);
        self.controller.submit();
        self.render_changes();

        self.controller.settle_latest().await;
        self.render_changes();

        self.controller.state().clone()
    }

    /// Read queries line by line from `input` until EOF or `quit`
    ///
    /// On EOF, pending searches are settled before returning so piped input
    /// still produces results.
    pub async fn run_interactive<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.output.write(OutputEvent::System(format!(
            "Searching with '{}'. Type a topic and press enter, 'quit' to exit.",
            self.controller.source_name()
        )));

        let mut lines = input.lines();
        self.prompt();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        self.controller.settle_latest().await;
                        self.render_changes();
                        break;
                    };

                    let line = line.trim();
                    if line == "quit" || line == "exit" {
                        break;
                    }

                    self.controller.set_query_text(line);
                    self.controller.submit();
                    self.render_changes();
                }

                Some(settled) = self.controller.settle(), if self.controller.in_flight() > 0 => {
                    self.on_settled(settled);
                }
            }
        }

        Ok(())
    }

    /// Render every state change received since the last call
    fn render_changes(&mut self) {
        while let Ok(state) = self.changes.try_recv() {
            write_state(self.output.as_ref(), &state);
        }
    }

    /// Render the outcome of a settled call; prompt again only when it
    /// changed what is on screen
    fn on_settled(&mut self, settled: Settled) {
        self.render_changes();
        match settled {
            Settled::Applied(_) => self.prompt(),
            Settled::Discarded(token) => {
                tracing::debug!(%token, "Superseded search finished");
            }
        }
    }

    fn prompt(&self) {
        if self.show_prompt {
            self.output.write(OutputEvent::Prompt("search> ".to_string()));
            self.output.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixedSource, ScriptedSource};
    use crate::types::VideoResult;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<OutputEvent>>>,
    }

    impl OutputWriter for Recorder {
        fn write(&self, event: OutputEvent) {
            self.events.lock().unwrap().push(event);
        }

        fn flush(&self) {}
    }

    impl Recorder {
        fn videos(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    OutputEvent::Video { video, .. } => Some(video.title.clone()),
                    _ => None,
                })
                .collect()
        }

        fn errors(&self) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| matches!(e, OutputEvent::Error(_)))
                .count()
        }

        fn prompts(&self) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| matches!(e, OutputEvent::Prompt(_)))
                .count()
        }

        fn len(&self) -> usize {
            self.events.lock().unwrap().len()
        }
    }

    fn fixed_session(recorder: &Recorder) -> Session {
        let controller = SearchController::new(Arc::new(FixedSource::new(Duration::ZERO)));
        Session::new(controller, Box::new(recorder.clone()))
    }

    #[tokio::test]
    async fn test_run_once_renders_results() {
        let recorder = Recorder::default();
        let mut session = fixed_session(&recorder);

        let state = session.run_once("cats").await;

        assert_eq!(state.results().map(<[VideoResult]>::len), Some(2));
        assert_eq!(recorder.videos(), ["Sample Video 1", "Sample Video 2"]);
        assert_eq!(session.controller().query_text(), "cats");
    }

    #[tokio::test]
    async fn test_run_once_renders_failure() {
        let recorder = Recorder::default();
        let source = ScriptedSource::new();
        let controller = SearchController::new(Arc::new(source.clone()));
        let mut session = Session::new(controller, Box::new(recorder.clone()));

        let failer = tokio::spawn({
            let source = source.clone();
            async move {
                source.wait_for_calls(1).await;
                source.fail(0, "backend down");
            }
        });

        let state = session.run_once("cats").await;
        failer.await.unwrap();

        assert!(state.failure().is_some());
        assert_eq!(recorder.errors(), 1);
    }

    #[tokio::test]
    async fn test_interactive_settles_pending_on_eof() {
        let recorder = Recorder::default();
        let mut session = fixed_session(&recorder);

        session.run_interactive(&b"cats\ndogs\n"[..]).await.unwrap();

        let state = session.controller().state();
        assert_eq!(state.token().map(|t| t.get()), Some(2));
        assert!(state.results().is_some());
        assert_eq!(session.controller().query_text(), "dogs");
    }

    #[tokio::test]
    async fn test_interactive_quit() {
        let recorder = Recorder::default();
        let mut session = fixed_session(&recorder);

        session.run_interactive(&b"quit\ncats\n"[..]).await.unwrap();

        assert_eq!(session.controller().state(), &SearchState::Idle);
        assert!(recorder.videos().is_empty());
    }

    #[tokio::test]
    async fn test_stale_settle_after_success_does_not_prompt() {
        let recorder = Recorder::default();
        let source = ScriptedSource::new();
        let controller = SearchController::new(Arc::new(source.clone()));
        let mut session = Session::new(controller, Box::new(recorder.clone()));

        let first = session.controller.submit();
        let second = session.controller.submit();
        source.wait_for_calls(2).await;

        source.resolve(1, vec![VideoResult::new("fresh", "", "", "")]);
        let settled = session.controller.settle().await.unwrap();
        assert_eq!(settled, Settled::Applied(second));
        session.on_settled(settled);
        assert_eq!(recorder.prompts(), 1);
        let rendered = recorder.len();

        source.resolve(0, vec![VideoResult::new("stale", "", "", "")]);
        let settled = session.controller.settle().await.unwrap();
        assert_eq!(settled, Settled::Discarded(first));
        session.on_settled(settled);

        assert_eq!(recorder.prompts(), 1);
        assert_eq!(recorder.len(), rendered);
        assert_eq!(recorder.videos(), ["fresh"]);
        assert_eq!(session.controller().state().token(), Some(second));
    }

    #[tokio::test]
    async fn test_prompt_goes_through_output_and_can_be_disabled() {
        let recorder = Recorder::default();
        let mut session = fixed_session(&recorder);
        session.run_interactive(&b"cats\n"[..]).await.unwrap();
        assert!(recorder.prompts() >= 1);

        let recorder = Recorder::default();
        let mut session = fixed_session(&recorder).with_prompt(false);
        session.run_interactive(&b"cats\n"[..]).await.unwrap();
        assert_eq!(recorder.prompts(), 0);
        assert_eq!(recorder.videos(), ["Sample Video 1", "Sample Video 2"]);
    }
}
