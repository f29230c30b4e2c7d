//! Web front end: one route, `GET /` renders the form and `POST /` answers it.

pub mod page;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::client::TutorClient;

pub use page::{render_page, PageContext};

#[derive(Debug, Default, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: String,
}

pub fn router(client: Arc<TutorClient>) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_question))
        .with_state(client)
}

/// Serve [`router`] on `listener` until the process is stopped.
pub async fn serve(listener: TcpListener, client: Arc<TutorClient>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }
    let app = router(client).layer(TraceLayer::new_for_http());
    axum::serve(listener, app).await
}

async fn show_form() -> Html<String> {
    Html(render_page(&PageContext::default()))
}

async fn submit_question(
    State(client): State<Arc<TutorClient>>,
    form: std::result::Result<Form<QuestionForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable form submission");
            let ctx = PageContext {
                error: "Please submit the question using the form.".to_string(),
                ..Default::default()
            };
            return (rejection.status(), Html(render_page(&ctx))).into_response();
        }
    };

    let question = form.question.trim();
    let mut ctx = PageContext {
        question: question.to_string(),
        ..Default::default()
    };

    if question.is_empty() {
        ctx.error = "Please enter a question.".to_string();
        return Html(render_page(&ctx)).into_response();
    }

    match client.ask(question).await {
        Ok(exchange) => {
            ctx.answered = true;
            ctx.processed = exchange.question.processed().to_string();
            ctx.raw_response = exchange.answer.raw_pretty();
            ctx.answer = exchange.answer.answer;
        }
        Err(e) => {
            warn!(provider = e.provider().unwrap_or("-"), error = %e, "exchange failed");
            ctx.error = e.to_string();
        }
    }

    Html(render_page(&ctx)).into_response()
}
