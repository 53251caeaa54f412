use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDate;
use creator_core::dashboard::{Overview, RevenueEntry, ViewsPoint};
use creator_core::{Field, SubmissionState};
use creator_signin::{FormController, FormSnapshot, NavigationPort, SubmissionPort};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SignIn,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFocus {
    Email,
    Password,
    Submit,
}

impl SignInFocus {
    fn next(self) -> Self {
        match self {
            SignInFocus::Email => SignInFocus::Password,
            SignInFocus::Password => SignInFocus::Submit,
            SignInFocus::Submit => SignInFocus::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            SignInFocus::Email => SignInFocus::Submit,
            SignInFocus::Password => SignInFocus::Email,
            SignInFocus::Submit => SignInFocus::Password,
        }
    }

    pub fn field(self) -> Option<Field> {
        match self {
            SignInFocus::Email => Some(Field::Email),
            SignInFocus::Password => Some(Field::Password),
            SignInFocus::Submit => None,
        }
    }
}

/// Hands redirects back to the render loop, which switches screens.
pub struct ChannelNavigator {
    tx: Sender<String>,
}

impl NavigationPort for ChannelNavigator {
    fn redirect(&mut self, path: &str) {
        let _ = self.tx.send(path.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub overview: Option<Overview>,
    pub revenue: Vec<RevenueEntry>,
    pub views: Vec<ViewsPoint>,
}

#[derive(Debug, Clone)]
pub struct SeriesSettings {
    pub days: usize,
    pub start: NaiveDate,
}

pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub focus: SignInFocus,
    pub form: FormController<ChannelNavigator>,
    pub dashboard: DashboardData,
    pub series: SeriesSettings,
    pub signed_in_as: Option<String>,
    pub status: Option<String>,
    pub error: Option<String>,
    port: Arc<dyn SubmissionPort>,
    destination: String,
    redirects: Receiver<String>,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new(port: Arc<dyn SubmissionPort>, destination: String, series: SeriesSettings) -> Self {
        let (form, redirects) = new_form(Arc::clone(&port), &destination);
        Self {
            mode: Mode::SignIn,
            show_help: false,
            should_quit: false,
            focus: SignInFocus::Email,
            form,
            dashboard: DashboardData::default(),
            series,
            signed_in_as: None,
            status: None,
            error: None,
            port,
            destination,
            redirects,
            actions: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.form.snapshot()
    }

    pub fn is_submitting(&self) -> bool {
        self.form.state().is_submitting()
    }

    /// Called once per tick: applies a finished submission and follows a
    /// redirect if the form issued one.
    pub fn poll(&mut self) {
        if self.form.poll_completion() {
            let rejection = match self.form.state() {
                SubmissionState::Failed(errors) => errors.form.clone(),
                _ => None,
            };
            if let Some(message) = rejection {
                self.set_error(message);
            }
        }
        while let Ok(path) = self.redirects.try_recv() {
            self.navigate(&path);
        }
    }

    pub fn apply_dashboard(&mut self, data: DashboardData) {
        self.dashboard = data;
    }

    pub fn apply_views(&mut self, views: Vec<ViewsPoint>) {
        self.dashboard.views = views;
    }

    fn navigate(&mut self, path: &str) {
        if path != self.destination {
            self.set_error(format!("unknown destination: {}", path));
            return;
        }
        self.signed_in_as = self.form.signed_in().map(str::to_string);
        self.clear_error();
        if let Some(email) = &self.signed_in_as {
            self.status = Some(format!("Signed in as {}", email));
        }
        self.mode = Mode::Dashboard;
        self.enqueue(Action::LoadDashboard);
    }

    fn sign_out(&mut self) {
        let (form, redirects) = new_form(Arc::clone(&self.port), &self.destination);
        self.form = form;
        self.redirects = redirects;
        self.focus = SignInFocus::Email;
        self.dashboard = DashboardData::default();
        self.signed_in_as = None;
        self.mode = Mode::SignIn;
        self.clear_error();
        self.set_status("Signed out");
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        if matches!(key.code, KeyCode::F(1)) {
            self.show_help = true;
            return;
        }

        match self.mode {
            Mode::SignIn => self.handle_sign_in_key(key),
            Mode::Dashboard => self.handle_dashboard_key(key),
        }
    }

    fn handle_sign_in_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if self.focus == SignInFocus::Submit => self.should_quit = true,
            KeyCode::Char('?') if self.focus == SignInFocus::Submit => self.show_help = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                SignInFocus::Email => self.focus = self.focus.next(),
                SignInFocus::Password | SignInFocus::Submit => self.submit(),
            },
            _ => {
                if let Some(field) = self.focus.field() {
                    let mut value = self.form.value(field).to_string();
                    if apply_text_input(&mut value, key) {
                        self.form.set_field(field, value);
                    }
                }
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.enqueue(Action::RefreshViews),
            KeyCode::Char('o') => self.sign_out(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if !self.form.can_submit() {
            return;
        }
        self.clear_error();
        self.status = None;
        self.form.submit();
        if let Some(errors) = self.form.state().errors() {
            if let Some(field) = errors.fields.keys().next() {
                self.focus = match field {
                    Field::Email => SignInFocus::Email,
                    Field::Password => SignInFocus::Password,
                };
            }
        }
    }
}

fn new_form(
    port: Arc<dyn SubmissionPort>,
    destination: &str,
) -> (FormController<ChannelNavigator>, Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let form = FormController::new(port, ChannelNavigator { tx }, destination);
    (form, rx)
}

/// Returns `true` when `target` changed.
fn apply_text_input(target: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
            true
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
            true
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            target.push(ch);
            true
        }
        KeyCode::Backspace => target.pop().is_some(),
        _ => false,
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Mode, SeriesSettings, SignInFocus};
    use crate::actions::execute_action;
    use creator_core::dashboard::default_series_start;
    use creator_core::{Field, SubmissionState};
    use creator_signin::SimulatedSubmission;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(800);

    fn app() -> App {
        App::new(
            Arc::new(SimulatedSubmission::new(DELAY).rejecting(["blocked@example.com"])),
            "/dashboard".to_string(),
            SeriesSettings {
                days: 30,
                start: default_series_start(),
            },
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn drain_actions(app: &mut App) {
        while let Some(action) = app.next_action() {
            execute_action(app, action).expect("action");
        }
    }

    #[test]
    fn typing_updates_focused_field_only() {
        let mut app = app();
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abcdef1!q");
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.form.value(Field::Email), "ada@example.com");
        assert_eq!(app.form.value(Field::Password), "Abcdef1!");
        assert!(!app.should_quit);
    }

    #[test]
    fn ctrl_w_and_ctrl_u_edit_the_field() {
        let mut app = app();
        type_text(&mut app, "first second");
        app.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(app.form.value(Field::Email), "first ");
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.form.value(Field::Email), "");
    }

    #[test]
    fn focus_cycles_through_fields_and_button() {
        let mut app = app();
        assert_eq!(app.focus, SignInFocus::Email);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, SignInFocus::Password);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, SignInFocus::Submit);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, SignInFocus::Email);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, SignInFocus::Submit);
    }

    #[test]
    fn invalid_submit_shows_field_errors_and_focuses_first() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abcdef1!");
        press(&mut app, KeyCode::Enter);

        let snapshot = app.snapshot();
        assert!(matches!(snapshot.submission_state, SubmissionState::Failed(_)));
        assert_eq!(
            snapshot.field_errors.get(&Field::Email).map(String::as_str),
            Some("Email is required")
        );
        assert_eq!(app.focus, SignInFocus::Email);
        assert_eq!(app.mode, Mode::SignIn);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_sign_in_switches_to_dashboard() {
        let mut app = app();
        type_text(&mut app, "Ada@Example.com");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Abcdef1!");
        press(&mut app, KeyCode::Enter);
        assert!(app.is_submitting());

        press(&mut app, KeyCode::Enter);
        app.poll();
        assert_eq!(app.mode, Mode::SignIn);

        tokio::time::sleep(DELAY * 2).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        app.poll();
        drain_actions(&mut app);

        assert_eq!(app.mode, Mode::Dashboard);
        assert_eq!(app.signed_in_as.as_deref(), Some("ada@example.com"));
        assert!(app.dashboard.overview.is_some());
        assert_eq!(app.dashboard.revenue.len(), 5);
        assert_eq!(app.dashboard.views.len(), 30);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.mode, Mode::SignIn);
        assert_eq!(app.form.state(), &SubmissionState::Idle);
        assert_eq!(app.form.value(Field::Email), "");
    }

    #[tokio::test(start_paused = true)]
    async fn dashboard_shows_authenticated_email_not_later_edits() {
        let mut app = app();
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abcdef1!");
        press(&mut app, KeyCode::Enter);
        assert!(app.is_submitting());

        press(&mut app, KeyCode::BackTab);
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        type_text(&mut app, "MALLORY@evil");
        assert_eq!(app.form.value(Field::Email), "MALLORY@evil");

        tokio::time::sleep(DELAY * 2).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        app.poll();

        assert_eq!(app.mode, Mode::Dashboard);
        assert_eq!(app.signed_in_as.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_sign_in_stays_on_form_with_error() {
        let mut app = app();
        type_text(&mut app, "blocked@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abcdef1!");
        press(&mut app, KeyCode::Enter);

        tokio::time::sleep(DELAY * 2).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        app.poll();

        assert_eq!(app.mode, Mode::SignIn);
        assert!(app.form.can_submit());
        assert!(app
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("sign-in rejected"));
    }
}
