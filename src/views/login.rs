//! Login Page

use gpui::{
    App, ClickEvent, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div,
    prelude::*, px,
};
use gpui_component::input::{Input, InputEvent, InputState};
use tracing::{debug, warn};

use crate::api::{LoginFieldErrors, LoginRequest, current_user, login, login_error_message};
use crate::app::entities::AppEntities;
use crate::components::primitives::button::Button;
use crate::i18n::tr;
use crate::services::run_in_tokio;
use crate::state::session_state::SessionState;
use crate::theme::colors::Palette;

/// Username/password form shown until a credential exists
pub struct LoginPage {
    entities: AppEntities,
    username: Entity<InputState>,
    password: Entity<InputState>,
    submitting: bool,
    /// Shown per field once a submit was attempted
    field_errors: LoginFieldErrors,
    error: Option<String>,
}

impl LoginPage {
    pub fn new(entities: AppEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let locale = entities.locale(cx);
        let username =
            cx.new(|cx| InputState::new(window, cx).placeholder(tr(locale, "login.username")));
        let password = cx.new(|cx| {
            InputState::new(window, cx)
                .masked(true)
                .placeholder(tr(locale, "login.password"))
        });

        for input in [&username, &password] {
            cx.subscribe(input, |this: &mut Self, _input, event: &InputEvent, cx| {
                if matches!(event, InputEvent::PressEnter { .. }) {
                    this.submit(cx);
                }
            })
            .detach();
        }
        cx.observe_in(&entities.i18n, window, |this, _, window, cx| {
            this.relabel(window, cx)
        })
        .detach();

        Self {
            entities,
            username,
            password,
            submitting: false,
            field_errors: LoginFieldErrors::default(),
            error: None,
        }
    }

    fn relabel(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let locale = self.entities.locale(cx);
        self.username.update(cx, |state, cx| {
            state.set_placeholder(tr(locale, "login.username"), window, cx)
        });
        self.password.update(cx, |state, cx| {
            state.set_placeholder(tr(locale, "login.password"), window, cx)
        });
        if !self.field_errors.is_empty() {
            self.field_errors = self.request(cx).validate(locale);
        }
        cx.notify();
    }

    fn request(&self, cx: &App) -> LoginRequest {
        LoginRequest::new(
            self.username.read(cx).value().trim(),
            self.password.read(cx).value().to_string(),
        )
    }

    fn submit(&mut self, cx: &mut Context<Self>) {
        if self.submitting {
            return;
        }
        let locale = self.entities.locale(cx);
        let request = self.request(cx);
        self.field_errors = request.validate(locale);
        self.error = None;
        if !self.field_errors.is_empty() {
            debug!("Login form incomplete");
            cx.notify();
            return;
        }

        let client = self.entities.session.read(cx).anonymous().clone();
        self.submitting = true;
        cx.notify();

        cx.spawn(async move |this, cx| {
            let result =
                run_in_tokio(async move { login(&client, &request, locale).await }).await;
            let _ = this.update(cx, |page, cx| {
                page.submitting = false;
                match result {
                    Ok(auth) => {
                        page.entities.session.update(cx, |session, cx| {
                            session.sign_in(auth);
                            cx.notify();
                        });
                        load_current_user(&page.entities.session, cx);
                    }
                    Err(e) => page.error = Some(login_error_message(&e, locale)),
                }
                cx.notify();
            });
        })
        .detach();
    }

    fn field(&self, label: String, input: Input, error: Option<String>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .child(div().text_xs().text_color(Palette::text_secondary()).child(label))
            .child(input)
            .when_some(error, |el, error| {
                el.child(div().text_xs().text_color(Palette::danger()).child(error))
            })
    }
}

/// Fetch the signed-in user for the header
pub fn load_current_user(session: &Entity<SessionState>, cx: &mut App) {
    let Some(client) = session.read(cx).client().cloned() else {
        return;
    };
    let session = session.clone();
    cx.spawn(async move |cx| match run_in_tokio(async move { current_user(&client).await }).await {
        Ok(user) => {
            let _ = session.update(cx, |session, cx| {
                session.set_user(user);
                cx.notify();
            });
        }
        Err(e) => warn!(error = %e, "Could not load current user"),
    })
    .detach();
}

impl Render for LoginPage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.locale(cx);

        div()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(Palette::background())
            .child(
                div()
                    .w(px(360.0))
                    .p_6()
                    .bg(Palette::content_bg())
                    .rounded_lg()
                    .shadow_md()
                    .flex()
                    .flex_col()
                    .gap_4()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(Palette::text_primary())
                            .child(tr(locale, "login.title")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(Palette::text_secondary())
                            .child(tr(locale, "login.subtitle")),
                    )
                    .when_some(self.error.clone(), |el, error| {
                        el.child(
                            div()
                                .px_3()
                                .py_2()
                                .rounded_md()
                                .bg(Palette::danger_soft())
                                .text_sm()
                                .text_color(Palette::danger())
                                .child(error),
                        )
                    })
                    .child(self.field(
                        tr(locale, "login.username"),
                        Input::new(&self.username),
                        self.field_errors.username.clone(),
                    ))
                    .child(self.field(
                        tr(locale, "login.password"),
                        Input::new(&self.password).mask_toggle(),
                        self.field_errors.password.clone(),
                    ))
                    .child(
                        Button::primary("login-submit", tr(locale, "login.submit"))
                            .busy(self.submitting, tr(locale, "login.signing_in"))
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.submit(cx)
                            })),
                    ),
            )
    }
}
