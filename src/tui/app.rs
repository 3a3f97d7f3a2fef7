//! Application state for the TUI
//!
//! The App struct owns the shared form state, the per-step form states, the
//! category load state and the active dialog, and orchestrates navigation,
//! validation and the two remote calls.

use std::sync::mpsc;
use std::thread;

use tracing::{info, warn};

use crate::catalog::{CatalogClient, CategoryCache, CategoryOption, SubmissionReceipt};
use crate::config::Settings;
use crate::error::WizardResult;
use crate::form::FormData;
use crate::wizard::{self, Step};

use super::dialogs::ErrorInfo;
use super::event::Event;
use super::steps::{EmploymentForm, LoanForm, PersonalForm};

/// Load state of the category list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLoad {
    /// A fetch is in flight
    Loading,
    /// Categories are available
    Ready(Vec<CategoryOption>),
    /// The last fetch failed; retry re-fetches
    Failed(String),
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    /// Success modal with the approval message
    Confirm(String),
    /// Blocking error dialog
    Error(ErrorInfo),
}

/// Main application state
pub struct App {
    /// Runtime settings
    pub settings: Settings,

    /// HTTP client, cloned into worker threads
    client: CatalogClient,

    /// Channel into the event loop, for worker completions
    events: mpsc::Sender<Event>,

    /// Shared form state accumulated across steps
    pub form: FormData,

    /// The step currently shown
    pub step: Step,

    /// Step 1 form state
    pub personal: PersonalForm,

    /// Step 2 form state
    pub employment: EmploymentForm,

    /// Step 3 form state
    pub loan: LoanForm,

    /// Category list load state
    pub categories: CategoryLoad,

    /// Single-slot category cache
    pub cache: CategoryCache,

    /// Generation of the newest category fetch; older completions are stale
    fetch_generation: u64,

    /// Generation of the newest submission
    submit_generation: u64,

    /// Whether a submission is in flight
    pub submitting: bool,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Transient status-bar message
    pub status: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create the app, entering at `requested` (resolved against the guards)
    pub fn new(
        settings: Settings,
        client: CatalogClient,
        events: mpsc::Sender<Event>,
        requested: Step,
    ) -> Self {
        let form = FormData::default();
        let cache = CategoryCache::new(settings.cache_ttl());
        let mut app = Self {
            personal: PersonalForm::from_form(&form),
            employment: EmploymentForm::from_form(&form),
            loan: LoanForm::from_form(&form),
            settings,
            client,
            events,
            form,
            step: Step::Personal,
            categories: CategoryLoad::Loading,
            cache,
            fetch_generation: 0,
            submit_generation: 0,
            submitting: false,
            active_dialog: ActiveDialog::None,
            status: None,
            should_quit: false,
        };
        app.goto(requested);
        app
    }

    /// Signal the event loop to exit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    /// Dismiss the active dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Enter a step, applying the completeness guards
    ///
    /// A request for an unreachable step lands on the earliest incomplete
    /// step instead. The target step's form state is rebuilt from shared
    /// state so revisits show the stored values.
    pub fn goto(&mut self, requested: Step) {
        let resolved = wizard::resolve_entry(requested, &self.form);
        if resolved != requested {
            info!(?requested, ?resolved, "step request redirected");
            self.status = Some(format!("Сначала заполните шаг {}", resolved.number()));
        } else {
            self.status = None;
        }

        self.step = resolved;
        match resolved {
            Step::Personal => {
                self.personal = PersonalForm::from_form(&self.form);
            }
            Step::Employment => {
                self.employment = EmploymentForm::from_form(&self.form);
                self.ensure_categories(false);
            }
            Step::Loan => {
                self.loan = LoanForm::from_form(&self.form);
            }
        }
    }

    /// Navigate back one step, keeping the current input
    pub fn go_back(&mut self) {
        let Some(previous) = self.step.back() else {
            return;
        };
        match self.step {
            Step::Employment => self.form.merge(self.employment.unvalidated_patch()),
            Step::Loan => self.form.merge(self.loan.patch()),
            Step::Personal => {}
        }
        self.goto(previous);
    }

    /// Submit the current step: validate, merge, advance (or send)
    pub fn submit_current(&mut self) {
        match self.step {
            Step::Personal => {
                if let Some(patch) = self.personal.validate() {
                    self.form.merge(patch);
                    info!("step 1 complete");
                    self.goto(Step::Employment);
                }
            }
            Step::Employment => {
                // Submission stays blocked until the category list resolved
                if !matches!(self.categories, CategoryLoad::Ready(_)) {
                    return;
                }
                if let Some(patch) = self.employment.validate() {
                    self.form.merge(patch);
                    info!("step 2 complete");
                    self.goto(Step::Loan);
                }
            }
            Step::Loan => {
                if self.submitting {
                    return;
                }
                if let Some(patch) = self.loan.validate() {
                    self.form.merge(patch);
                    self.spawn_submission();
                }
            }
        }
    }

    /// Make sure categories are available or being fetched
    ///
    /// `force` drops the cache slot first, so a retry always goes back to
    /// the network; otherwise a fresh cache entry is served directly.
    pub fn ensure_categories(&mut self, force: bool) {
        if force {
            self.cache.invalidate();
        } else if let Some(list) = self.cache.fresh() {
            let list = list.to_vec();
            self.employment
                .set_categories(&list, self.form.workplace.as_deref());
            self.categories = CategoryLoad::Ready(list);
            return;
        }
        self.spawn_category_fetch();
    }

    /// User-triggered retry of the category fetch
    pub fn retry_categories(&mut self) {
        info!("retrying category fetch");
        self.ensure_categories(true);
    }

    fn spawn_category_fetch(&mut self) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.categories = CategoryLoad::Loading;

        let client = self.client.clone();
        let sender = self.events.clone();
        thread::spawn(move || {
            let result = client.fetch_categories();
            let _ = sender.send(Event::CategoriesLoaded { generation, result });
        });
    }

    /// Handle a category fetch completion
    pub fn on_categories_loaded(
        &mut self,
        generation: u64,
        result: WizardResult<Vec<CategoryOption>>,
    ) {
        // A newer fetch started since; discard the late result
        if generation != self.fetch_generation {
            return;
        }
        match result {
            Ok(list) => {
                self.cache.store(list.clone());
                self.employment
                    .set_categories(&list, self.form.workplace.as_deref());
                self.categories = CategoryLoad::Ready(list);
            }
            Err(err) => {
                warn!(%err, "category fetch failed");
                // The banner owns the user-facing wording; transport errors
                // collapse into the one message the retry hint belongs to.
                let message = if err.is_remote() {
                    "Не удалось загрузить категории".to_string()
                } else {
                    err.to_string()
                };
                self.categories = CategoryLoad::Failed(message);
            }
        }
    }

    fn spawn_submission(&mut self) {
        self.submit_generation += 1;
        let generation = self.submit_generation;
        self.submitting = true;

        let title = self.form.submission_title();
        let client = self.client.clone();
        let sender = self.events.clone();
        thread::spawn(move || {
            let result = client.submit_application(&title);
            let _ = sender.send(Event::SubmissionDone { generation, result });
        });
    }

    /// Handle a submission completion
    pub fn on_submission_done(
        &mut self,
        generation: u64,
        result: WizardResult<SubmissionReceipt>,
    ) {
        if generation != self.submit_generation {
            return;
        }
        self.submitting = false;
        match result {
            Ok(receipt) => {
                info!(id = ?receipt.id, "application accepted");
                let amount = self.form.loan_amount.unwrap_or_default();
                let term = self.form.loan_term.unwrap_or_default();
                self.active_dialog =
                    ActiveDialog::Confirm(self.form.approval_message(amount, term));
            }
            Err(err) => {
                warn!(%err, "submission failed");
                self.active_dialog = ActiveDialog::Error(ErrorInfo::from_error(&err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WizardError;
    use crate::form::Gender;

    /// App wired to an unroutable endpoint so no worker can reach a real
    /// service; the receiver keeps worker sends from failing loudly.
    fn test_app() -> (App, mpsc::Receiver<Event>) {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9".into(),
            ..Settings::default()
        };
        let client = CatalogClient::new(&settings).unwrap();
        let (sender, receiver) = mpsc::channel();
        (App::new(settings, client, sender, Step::Personal), receiver)
    }

    fn sample_categories() -> Vec<CategoryOption> {
        vec![CategoryOption {
            value: "smartphones".into(),
            label: "Smartphones".into(),
        }]
    }

    fn complete_step1(app: &mut App) {
        app.personal.phone = app.personal.phone.clone().content("0123 456 789");
        app.personal.first_name = app.personal.first_name.clone().content("Ana");
        app.personal.last_name = app.personal.last_name.clone().content("Pop");
        app.personal.gender.select_value("Мужской");
        app.submit_current();
    }

    #[test]
    fn test_valid_step1_merges_and_advances() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);

        assert_eq!(app.step, Step::Employment);
        assert_eq!(app.form.phone.as_deref(), Some("0123 456 789"));
        assert_eq!(app.form.gender, Some(Gender::Male));
        assert_eq!(app.form.workplace, None);
    }

    #[test]
    fn test_invalid_step1_blocks() {
        let (mut app, _rx) = test_app();
        app.submit_current();
        assert_eq!(app.step, Step::Personal);
        assert!(app.personal.phone.error.is_some());
        assert_eq!(app.form, FormData::default());
    }

    #[test]
    fn test_direct_entry_to_loan_redirects_to_first_incomplete() {
        let (mut app, _rx) = test_app();
        app.goto(Step::Loan);
        assert_eq!(app.step, Step::Personal);
        assert!(app.status.is_some());

        complete_step1(&mut app);
        app.goto(Step::Loan);
        assert_eq!(app.step, Step::Employment);
    }

    #[test]
    fn test_step2_submit_blocked_until_categories_ready() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        assert_eq!(app.categories, CategoryLoad::Loading);

        app.employment.address = app.employment.address.clone().content("Str. X 1");
        app.submit_current();
        assert_eq!(app.step, Step::Employment);

        app.on_categories_loaded(1, Ok(sample_categories()));
        app.employment.workplace.select_value("smartphones");
        app.submit_current();
        assert_eq!(app.step, Step::Loan);
        assert_eq!(app.form.workplace.as_deref(), Some("smartphones"));
    }

    #[test]
    fn test_late_fetch_result_is_discarded() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.retry_categories(); // generation bumps to 2

        app.on_categories_loaded(1, Ok(sample_categories()));
        assert_eq!(app.categories, CategoryLoad::Loading);

        app.on_categories_loaded(2, Ok(sample_categories()));
        assert!(matches!(app.categories, CategoryLoad::Ready(_)));
    }

    #[test]
    fn test_fetch_failure_surfaces_retryable_error() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.on_categories_loaded(1, Err(WizardError::Network("refused".into())));
        assert_eq!(
            app.categories,
            CategoryLoad::Failed("Не удалось загрузить категории".into())
        );
    }

    #[test]
    fn test_cached_categories_skip_fetch_on_revisit() {
        let (mut app, _rx) = test_app();
        app.cache.store(sample_categories());
        complete_step1(&mut app);
        assert!(matches!(app.categories, CategoryLoad::Ready(_)));
    }

    #[test]
    fn test_back_from_step2_keeps_typed_address() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.employment.address = app.employment.address.clone().content("Str. X 1");
        app.go_back();

        assert_eq!(app.step, Step::Personal);
        assert_eq!(app.form.address.as_deref(), Some("Str. X 1"));
        // typed address alone must not unlock step 3
        app.goto(Step::Loan);
        assert_eq!(app.step, Step::Employment);
    }

    #[test]
    fn test_back_while_categories_unresolved_keeps_stored_workplace() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.on_categories_loaded(1, Ok(sample_categories()));
        app.employment.workplace.select_value("smartphones");
        app.employment.address = app.employment.address.clone().content("Str. X 1");
        app.submit_current();
        assert_eq!(app.step, Step::Loan);

        // revisit step 2 after the cache slot expired; the select is empty
        // while the new fetch is in flight
        app.cache.invalidate();
        app.go_back();
        assert_eq!(app.categories, CategoryLoad::Loading);

        app.go_back();
        assert_eq!(app.form.workplace.as_deref(), Some("smartphones"));
        assert!(crate::wizard::step2_complete(&app.form));
    }

    #[test]
    fn test_successful_submission_opens_confirm_dialog() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.on_categories_loaded(1, Ok(sample_categories()));
        app.employment.workplace.select_value("smartphones");
        app.employment.address = app.employment.address.clone().content("Str. X 1");
        app.submit_current();

        app.loan.amount.set_value(500);
        app.loan.term.set_value(15);
        app.submit_current();
        assert!(app.submitting);

        app.on_submission_done(
            1,
            Ok(SubmissionReceipt {
                id: Some(195),
                title: Some("Ana Pop".into()),
            }),
        );
        assert!(!app.submitting);
        assert_eq!(
            app.active_dialog,
            ActiveDialog::Confirm(
                "Поздравляем, Pop Ana. Вам одобрена $500 на 15 дней.".into()
            )
        );
    }

    #[test]
    fn test_failed_submission_keeps_step_and_values() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.on_categories_loaded(1, Ok(sample_categories()));
        app.employment.workplace.select_value("smartphones");
        app.employment.address = app.employment.address.clone().content("Str. X 1");
        app.submit_current();
        app.submit_current(); // step 3, defaults 200/10

        app.on_submission_done(
            1,
            Err(WizardError::Http {
                status: 500,
                body: "boom".into(),
            }),
        );
        assert_eq!(app.step, Step::Loan);
        assert_eq!(app.form.loan_amount, Some(200));
        match &app.active_dialog {
            ActiveDialog::Error(info) => {
                assert_eq!(info.details, "Ошибка отправки: 500 boom");
            }
            other => panic!("expected error dialog, got {other:?}"),
        }
    }

    #[test]
    fn test_submission_transport_failure_names_the_network() {
        let (mut app, _rx) = test_app();
        complete_step1(&mut app);
        app.on_categories_loaded(1, Ok(sample_categories()));
        app.employment.workplace.select_value("smartphones");
        app.employment.address = app.employment.address.clone().content("Str. X 1");
        app.submit_current();
        app.submit_current(); // step 3, defaults 200/10

        app.on_submission_done(1, Err(WizardError::Network("connection refused".into())));
        match &app.active_dialog {
            ActiveDialog::Error(info) => {
                assert_eq!(info.details, "Ошибка сети: connection refused");
                // the category banner wording stays on the category banner
                assert!(!info.details.contains("категории"));
            }
            other => panic!("expected error dialog, got {other:?}"),
        }
    }
}
