use leptos::prelude::*;
use rembg::api::{self, AuthUser, ValidateTokenRequest};
use rembg::auth::{AuthFlow, AuthStep};
use rembg::batch::BatchQueue;
use rembg::config::AppConfig;
use rembg::download::{plan_batch_download, plan_single_download, BatchDownload, SingleDownload};
use rembg::forms::{LoginForm, RegisterForm};
use rembg::image::{is_image_mime, BatchOutcome, CurrentImage, ProcessedImage};
use rembg::session::{restore, usable_token, Session};
use rembg::size::SizeType;
use rembg::theme::Theme;
use rembg::ApiError;
use wasm_bindgen_futures::spawn_local;

use super::fetch::{post_files, post_json};
use super::files::{download_bytes, file_list_to_vec, preview_url, revoke_preview_url};
use super::storage::{
    apply_theme_to_document, local_storage_get_string, local_storage_remove,
    local_storage_set_string, system_prefers_dark,
};
use crate::ui_model::ModalKind;

pub(super) const LOCALSTORAGE_CONFIG_KEY: &str = "rembg.config.v1";

/// Thumbnail of a file waiting in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PreviewItem {
    pub(super) id: u64,
    pub(super) name: String,
    pub(super) url: String,
}

/// Page-wide reactive state. Every field is an arena handle, so this is `Copy`.
#[derive(Clone, Copy)]
pub(super) struct AppState {
    pub(super) config: StoredValue<AppConfig>,
    pub(super) session: RwSignal<Session>,
    pub(super) theme: RwSignal<Theme>,
    pub(super) modal: RwSignal<Option<ModalKind>>,
    pub(super) loading: RwSignal<bool>,
    /// The result on screen and the upload it came from, always replaced together.
    pub(super) current: RwSignal<Option<CurrentImage<web_sys::File>>, LocalStorage>,
    pub(super) previews: RwSignal<Vec<PreviewItem>>,
    pub(super) batch_results: RwSignal<Option<Vec<BatchOutcome>>>,
    batch: StoredValue<BatchQueue<web_sys::File>, LocalStorage>,
}

impl AppState {
    pub(super) fn new(config: AppConfig) -> Self {
        let saved = local_storage_get_string(&config.theme_key);
        let theme = Theme::resolve(saved.as_deref(), system_prefers_dark());
        apply_theme_to_document(theme);

        Self {
            config: StoredValue::new(config),
            session: RwSignal::new(Session::Guest),
            theme: RwSignal::new(theme),
            modal: RwSignal::new(None),
            loading: RwSignal::new(false),
            current: RwSignal::new_local(None),
            previews: RwSignal::new(Vec::new()),
            batch_results: RwSignal::new(None),
            batch: StoredValue::new_local(BatchQueue::new()),
        }
    }

    fn token(&self) -> Option<String> {
        let key = self.config.with_value(|c| c.token_key.clone());
        usable_token(local_storage_get_string(&key))
    }

    // ---- theme ----

    pub(super) fn toggle_theme(self) {
        let next = self.theme.get_untracked().toggle();
        self.theme.set(next);
        let key = self.config.with_value(|c| c.theme_key.clone());
        local_storage_set_string(&key, next.as_str());
        apply_theme_to_document(next);
    }

    // ---- auth ----

    /// Restores a session from the stored token, dropping it if the backend no longer accepts it.
    pub(super) fn check_auth(self) {
        let Some(token) = self.token() else {
            self.session.set(Session::Guest);
            return;
        };
        spawn_local(async move {
            let cfg = self.config.get_value();
            let body = match serde_json::to_string(&ValidateTokenRequest { token: &token }) {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("validate-token request did not serialize: {e}");
                    return;
                }
            };
            let restored = match post_json(&cfg.validate_token_url(), &body).await {
                Ok(raw) => restore(&token, Ok((raw.status, raw.body.as_str()))),
                Err(e) => restore(&token, Err(e)),
            };
            if restored.drop_token {
                local_storage_remove(&cfg.token_key);
            }
            if let Some(name) = restored.session.username() {
                tracing::info!(username = %name, "session restored");
            }
            self.session.set(restored.session);
        });
    }

    fn sign_in(self, user: AuthUser) {
        if let Some(token) = user.token.as_deref() {
            let key = self.config.with_value(|c| c.token_key.clone());
            local_storage_set_string(&key, token);
        }
        tracing::info!(username = %user.record.username, "signed in");
        self.session.set(Session::SignedIn(user));
        self.modal.set(None);
    }

    pub(super) fn log_out(self) {
        let key = self.config.with_value(|c| c.token_key.clone());
        local_storage_remove(&key);
        self.session.set(Session::Guest);
        tracing::info!("signed out");
    }

    /// Submits the login form. `on_done` receives the inline error text, or `None` on success.
    pub(super) fn log_in(self, form: LoginForm, on_done: impl FnOnce(Option<String>) + 'static) {
        let step = self.config.with_value(|cfg| AuthFlow::login(cfg, form));
        self.run_auth(step, "login", on_done);
    }

    /// Creates the account, then logs in with the same credentials.
    pub(super) fn register(
        self,
        form: RegisterForm,
        on_done: impl FnOnce(Option<String>) + 'static,
    ) {
        let step = self.config.with_value(|cfg| AuthFlow::register(cfg, &form));
        self.run_auth(step, "registration", on_done);
    }

    fn run_auth(
        self,
        step: AuthStep,
        what: &'static str,
        on_done: impl FnOnce(Option<String>) + 'static,
    ) {
        spawn_local(async move {
            match drive_auth(step).await {
                Ok(user) => {
                    self.sign_in(user);
                    on_done(None);
                }
                Err(e) => {
                    tracing::warn!("{what} failed: {e}");
                    on_done(Some(e.form_text()));
                }
            }
        });
    }

    // ---- single image ----

    /// Entry point for the drop zone: only the first dropped file counts, and only images.
    pub(super) fn accept_drop(self, files: Option<web_sys::FileList>) {
        let Some(file) = file_list_to_vec(files).into_iter().next() else {
            return;
        };
        if !is_image_mime(&file.type_()) {
            tracing::debug!(mime = %file.type_(), "ignoring non-image drop");
            return;
        }
        self.process_image(file);
    }

    pub(super) fn process_image(self, file: web_sys::File) {
        let size = self.session.with_untracked(SizeType::default_for);
        self.process_image_with_size(file, size);
    }

    fn process_image_with_size(self, file: web_sys::File, size: SizeType) {
        self.loading.set(true);
        self.current.set(None);

        spawn_local(async move {
            let cfg = self.config.get_value();
            let token = self.token();
            tracing::info!(name = %file.name(), %size, "removing background");
            let res = post_files(
                &cfg.remove_bg_url(size),
                "image",
                std::slice::from_ref(&file),
                token.as_deref(),
            )
            .await
            .and_then(|raw| api::parse_remove_bg(raw.status, &raw.body, size));
            match res {
                Ok(image) => self.current.set(Some(CurrentImage {
                    image,
                    source: file,
                })),
                Err(e) => {
                    tracing::error!("remove-bg failed: {e}");
                    alert(&e.alert_text("the image"));
                }
            }
            self.loading.set(false);
        });
    }

    pub(super) fn download_single(self, requested: SizeType) {
        let session = self.session.get_untracked();
        let plan = self
            .current
            .with_untracked(|c| plan_single_download(&session, c.as_ref(), requested));
        match plan {
            None => {}
            Some(SingleDownload::PromptLogin) => self.modal.set(Some(ModalKind::Login)),
            Some(SingleDownload::Reprocess { source, size }) => {
                self.process_image_with_size(source, size);
            }
            Some(SingleDownload::Save { name }) => self.current.with_untracked(|c| {
                if let Some(c) = c {
                    save_image(&name, &c.image);
                }
            }),
        }
    }

    // ---- batch ----

    pub(super) fn select_batch(self, files: Vec<web_sys::File>) {
        if files.is_empty() {
            return;
        }
        self.previews.update(|ps| {
            for p in ps.drain(..) {
                revoke_preview_url(&p.url);
            }
        });
        let ids = self
            .batch
            .try_update_value(|q| q.replace(files.clone()))
            .unwrap_or_default();
        let items = ids
            .into_iter()
            .zip(files.iter())
            .map(|(id, file)| {
                let url = preview_url(file).unwrap_or_else(|e| {
                    tracing::warn!("no preview for {}: {e}", file.name());
                    String::new()
                });
                PreviewItem {
                    id,
                    name: file.name(),
                    url,
                }
            })
            .collect();
        self.previews.set(items);
    }

    pub(super) fn remove_from_batch(self, id: u64) {
        self.batch.update_value(|q| {
            q.remove(id);
        });
        self.previews.update(|ps| {
            ps.retain(|p| {
                if p.id == id {
                    revoke_preview_url(&p.url);
                    false
                } else {
                    true
                }
            })
        });
    }

    /// Mirrors the batch queue one-to-one, so it also drives the "process batch" button.
    pub(super) fn batch_ready(self) -> bool {
        !self.previews.get().is_empty()
    }

    pub(super) fn process_batch(self) {
        if self.batch.with_value(BatchQueue::is_empty) {
            return;
        }
        let files: Vec<web_sys::File> = self.batch.with_value(|q| q.files().cloned().collect());
        let size = self.session.with_untracked(SizeType::default_for);
        self.loading.set(true);
        self.batch_results.set(None);

        spawn_local(async move {
            let cfg = self.config.get_value();
            let token = self.token();
            tracing::info!(count = files.len(), %size, "processing batch");
            let res = post_files(&cfg.batch_process_url(size), "images", &files, token.as_deref())
                .await
                .and_then(|raw| api::parse_batch(raw.status, &raw.body, size));
            match res {
                Ok(outcomes) => self.batch_results.set(Some(outcomes)),
                Err(e) => {
                    tracing::error!("batch-process failed: {e}");
                    alert(&e.alert_text("the images"));
                }
            }
            self.loading.set(false);
        });
    }

    pub(super) fn download_all(self, requested: SizeType) {
        let session = self.session.get_untracked();
        let outcomes = self.batch_results.get_untracked().unwrap_or_default();
        match plan_batch_download(&session, &outcomes, requested) {
            BatchDownload::PromptLogin => self.modal.set(Some(ModalKind::Login)),
            BatchDownload::Save(files) => {
                for (name, idx) in files {
                    if let Some(image) = outcomes.get(idx).and_then(BatchOutcome::image) {
                        save_image(&name, image);
                    }
                }
            }
        }
    }

    pub(super) fn download_result(self, idx: usize) {
        let outcome = self
            .batch_results
            .with_untracked(|r| r.as_ref().and_then(|r| r.get(idx).cloned()));
        let Some(outcome) = outcome else {
            return;
        };
        if let (Some(name), Some(image)) = (outcome.download_name(), outcome.image()) {
            save_image(&name, image);
        }
    }
}

/// Sends each request the flow asks for until it settles.
async fn drive_auth(mut step: AuthStep) -> Result<AuthUser, ApiError> {
    loop {
        step = match step {
            AuthStep::Done(res) => return res,
            AuthStep::Send { post, then } => match post_json(&post.url, &post.body).await {
                Ok(raw) => then.advance(Ok((raw.status, raw.body.as_str()))),
                Err(e) => then.advance(Err(e)),
            },
        };
    }
}

fn save_image(name: &str, image: &ProcessedImage) {
    let res = image
        .png_bytes()
        .map_err(|e| e.to_string())
        .and_then(|bytes| download_bytes(name, &bytes, "image/png"));
    if let Err(e) = res {
        tracing::error!("download of {name} failed: {e}");
        alert(&format!("Download failed: {e}"));
    }
}

pub(super) fn alert(msg: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(msg);
    }
}
