use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use rembg::forms::{LoginForm, RegisterForm};

use super::state::AppState;
use crate::ui_model::{modal_class, ModalKind, TierVisibility};

#[component]
pub(super) fn Header(state: AppState) -> impl IntoView {
    let tier = Memo::new(move |_| state.session.with(TierVisibility::for_session));
    let username = move || {
        state
            .session
            .with(|s| s.username().unwrap_or_default().to_string())
    };

    view! {
        <header class="app-header">
            <h1 class="brand">"Background Remover"</h1>
            <div class="app-header-right">
                <button
                    id="theme-toggle"
                    class="icon-btn"
                    title="Toggle theme"
                    on:click=move |_| state.toggle_theme()
                >
                    <i id="theme-icon" class=move || state.theme.get().icon_class()></i>
                </button>

                <Show when=move || tier.get().auth_buttons>
                    <div id="auth-buttons" class="auth-buttons">
                        <button
                            id="login-btn"
                            class="btn ghost"
                            on:click=move |_| state.modal.set(Some(ModalKind::Login))
                        >
                            "Log in"
                        </button>
                        <button
                            id="register-btn"
                            class="btn"
                            on:click=move |_| state.modal.set(Some(ModalKind::Register))
                        >
                            "Sign up"
                        </button>
                    </div>
                </Show>

                <Show when=move || tier.get().user_info>
                    <div id="user-info" class="user-info">
                        <span id="username">{username}</span>
                        <button id="logout-btn" class="btn ghost" on:click=move |_| state.log_out()>
                            "Log out"
                        </button>
                    </div>
                </Show>
            </div>
        </header>

        <Show when=move || tier.get().free_account_info>
            <p id="free-account-info" class="free-account-info">
                "Guests download reduced-size results. Log in for full resolution."
            </p>
        </Show>
    }
}

#[component]
pub(super) fn AuthModals(state: AppState) -> impl IntoView {
    view! {
        <Modal state=state kind=ModalKind::Login>
            <LoginPanel state=state />
        </Modal>
        <Modal state=state kind=ModalKind::Register>
            <RegisterPanel state=state />
        </Modal>
    }
}

/// Backdrop plus panel. A click on the backdrop closes it; clicks inside the panel do not.
#[component]
fn Modal(state: AppState, kind: ModalKind, children: Children) -> impl IntoView {
    let close = move || state.modal.set(None);

    view! {
        <div
            class=move || modal_class(state.modal.get() == Some(kind))
            on:click=move |_| close()
        >
            <div class="modal-panel" on:click=|ev: MouseEvent| ev.stop_propagation()>
                <div class="modal-head">
                    <h2>{kind.title()}</h2>
                    <button class="modal-close" title="Close" on:click=move |_| close()>
                        "×"
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn InlineError(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <p class="form-error">{move || error.get().unwrap_or_default()}</p>
        </Show>
    }
}

#[component]
fn LoginPanel(state: AppState) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        state.log_in(form, move |err| {
            pending.set(false);
            if err.is_none() {
                email.set(String::new());
                password.set(String::new());
            }
            error.set(err);
        });
    };

    view! {
        <form id="login-form" class="auth-form" on:submit=on_submit>
            <label>
                "Email"
                <input
                    type="email"
                    name="email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    name="password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <InlineError error=error />
            <button type="submit" class="btn" disabled=move || pending.get()>
                {ModalKind::Login.submit_label()}
            </button>
        </form>
    }
}

#[component]
fn RegisterPanel(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let reset = move || {
        for field in [username, email, password, password_confirm] {
            field.set(String::new());
        }
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        let form = RegisterForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirm: password_confirm.get_untracked(),
        };
        state.register(form, move |err| {
            pending.set(false);
            if err.is_none() {
                reset();
            }
            error.set(err);
        });
    };

    view! {
        <form id="register-form" class="auth-form" on:submit=on_submit>
            {text_field("Username", "username", "text", username)}
            {text_field("Email", "email", "email", email)}
            {text_field("Password", "password", "password", password)}
            {text_field("Confirm password", "passwordConfirm", "password", password_confirm)}
            <InlineError error=error />
            <button type="submit" class="btn" disabled=move || pending.get()>
                {ModalKind::Register.submit_label()}
            </button>
        </form>
    }
}

fn text_field(
    label: &'static str,
    name: &'static str,
    kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=kind
                name=name
                required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}
