//! End-to-end dispatch tests over a realistically shaped pipeline:
//! logging, a confirmation gate, and a provider router in front of
//! scripted wallet backends.

use hermes_core::{HermesError, ProviderType, RequestArguments, RequestOptions};
use hermes_middleware::stages::confirmation::REJECTED_MESSAGE;
use hermes_middleware::stages::{
    BaseInterceptor, ConfirmationGate, DisconnectedInterceptor, LoggingMiddleware,
    SignerInterceptor,
};
use hermes_middleware::{
    Composer, Interceptor, RequestContext, UnsupportedMethodFallback,
};
use hermes_test::{
    init_tracing, ApproveAllPrompt, BrokenPrompt, DenyAllPrompt, EventLog, MockProvider,
    RecordingMiddleware,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// A pipeline in the shape real deployments use: logging outermost, then
/// the user gate, then provider routing.
fn pipeline(
    prompt: Arc<dyn hermes_core::UserPrompt>,
    injected: Arc<MockProvider>,
    session: Arc<MockProvider>,
) -> Composer {
    let router = Interceptor::builder()
        .route_single(ProviderType::Disconnected, DisconnectedInterceptor)
        .route_single(ProviderType::Injected, BaseInterceptor::new(injected))
        .route_single(ProviderType::WalletConnect, SignerInterceptor::new(session))
        .build();

    Composer::new()
        .with(LoggingMiddleware::default())
        .with(ConfirmationGate::new(prompt))
        .with(router)
}

fn sign_request() -> RequestArguments {
    RequestArguments::new("personal_sign", vec![json!("0xdead"), json!("0xaddr")])
}

#[tokio::test]
async fn approved_sign_request_reaches_the_session_wallet() {
    init_tracing();
    let session = Arc::new(MockProvider::returning(json!("0xsignature")));
    let pipeline = pipeline(
        Arc::new(ApproveAllPrompt),
        Arc::new(MockProvider::returning(json!(null))),
        session.clone(),
    );

    let mut ctx = RequestContext::new(ProviderType::WalletConnect, sign_request());
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert!(!ctx.writeable());
    assert!(ctx.error().is_none());
    assert_eq!(ctx.result(), Some(&json!("0xsignature")));

    let response = ctx.response().unwrap();
    assert_eq!(response.id, ctx.id());
    assert_eq!(response.result, json!("0xsignature"));

    assert_eq!(
        session.requests(),
        vec!["sign_personal_message(0xdead, 0xaddr)".to_string()]
    );
}

#[tokio::test]
async fn denied_request_never_touches_a_wallet() {
    init_tracing();
    let injected = Arc::new(MockProvider::returning(json!("0xsignature")));
    let session = Arc::new(MockProvider::returning(json!("0xsignature")));
    let pipeline = pipeline(Arc::new(DenyAllPrompt), injected.clone(), session.clone());

    let mut ctx = RequestContext::new(ProviderType::WalletConnect, sign_request());
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert!(!ctx.writeable());
    assert_eq!(ctx.error().unwrap().to_string(), REJECTED_MESSAGE);
    assert!(ctx.result().is_none());
    assert!(injected.requests().is_empty());
    assert!(session.requests().is_empty());
}

#[tokio::test]
async fn broken_prompt_reports_the_rejection_fallback() {
    init_tracing();
    let session = Arc::new(MockProvider::returning(json!("0xsignature")));
    let pipeline = pipeline(
        Arc::new(BrokenPrompt::new("")),
        Arc::new(MockProvider::returning(json!(null))),
        session.clone(),
    );

    let mut ctx = RequestContext::new(ProviderType::WalletConnect, sign_request());
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert_eq!(ctx.error().unwrap().to_string(), REJECTED_MESSAGE);
    assert!(session.requests().is_empty());
}

#[tokio::test]
async fn silent_requests_skip_the_gate_entirely() {
    init_tracing();
    let session = Arc::new(MockProvider::returning(json!("0xsignature")));
    let pipeline = pipeline(
        Arc::new(DenyAllPrompt),
        Arc::new(MockProvider::returning(json!(null))),
        session.clone(),
    );

    let mut ctx = RequestContext::new(ProviderType::WalletConnect, sign_request())
        .with_options(RequestOptions { silent: true });
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert_eq!(ctx.result(), Some(&json!("0xsignature")));
}

#[tokio::test]
async fn disconnected_wallet_methods_fail_softly() {
    init_tracing();
    let pipeline = pipeline(
        Arc::new(ApproveAllPrompt),
        Arc::new(MockProvider::returning(json!(null))),
        Arc::new(MockProvider::returning(json!(null))),
    );

    let mut ctx = RequestContext::new(ProviderType::Disconnected, sign_request());
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert_eq!(ctx.error().unwrap().to_string(), "No wallet connected.");
}

#[tokio::test]
async fn unroutable_provider_rejects_through_the_fallback() {
    init_tracing();
    let pipeline = pipeline(
        Arc::new(ApproveAllPrompt),
        Arc::new(MockProvider::returning(json!(null))),
        Arc::new(MockProvider::returning(json!(null))),
    );

    // Fortmatic has no configured chain, so the request leaves the router
    // unhandled and the dispatch-level fallback rejects it.
    let mut ctx = RequestContext::new(ProviderType::Fortmatic, sign_request());
    let error = pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap_err();

    assert!(matches!(error, HermesError::UnsupportedMethod { .. }));
    assert!(ctx.writeable());
}

#[tokio::test]
async fn encoded_provider_error_surfaces_as_the_context_error() {
    init_tracing();
    let injected = Arc::new(MockProvider::returning(
        json!({"error": {"code": 4001, "message": "rejected by user"}}),
    ));
    let pipeline = pipeline(
        Arc::new(ApproveAllPrompt),
        injected,
        Arc::new(MockProvider::returning(json!(null))),
    );

    let mut ctx = RequestContext::new(ProviderType::Injected, sign_request());
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert_eq!(ctx.error().unwrap().to_string(), "rejected by user");
}

#[tokio::test]
async fn middleware_observe_the_dispatch_in_onion_order() {
    init_tracing();
    let log = EventLog::new();
    let router = Interceptor::builder()
        .route_single(
            ProviderType::Injected,
            RecordingMiddleware::terminal("provider", &log, json!("0xdone")),
        )
        .build();
    let pipeline = Composer::new()
        .with(RecordingMiddleware::passthrough("outer", &log))
        .with(RecordingMiddleware::passthrough("inner", &log))
        .with(router);

    let mut ctx = RequestContext::new(ProviderType::Injected, sign_request());
    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    assert_eq!(
        log.snapshot(),
        vec![
            "outer-before",
            "inner-before",
            "provider-end",
            "inner-after",
            "outer-after"
        ]
    );
    assert_eq!(ctx.result(), Some(&json!("0xdone")));
}

#[tokio::test]
async fn callbacks_receive_the_pair_readers_observe() {
    init_tracing();
    let session = Arc::new(MockProvider::returning(json!("0xsignature")));
    let pipeline = pipeline(
        Arc::new(ApproveAllPrompt),
        Arc::new(MockProvider::returning(json!(null))),
        session,
    );

    let observed: Arc<Mutex<Option<(Option<String>, Option<Value>)>>> =
        Arc::new(Mutex::new(None));
    let mut ctx = RequestContext::new(ProviderType::WalletConnect, sign_request());
    {
        let observed = observed.clone();
        ctx.on_response(Arc::new(move |error, response| {
            *observed.lock().unwrap() = Some((
                error.map(ToString::to_string),
                response.map(|r| r.result.clone()),
            ));
        }));
    }

    pipeline
        .dispatch(&mut ctx, &UnsupportedMethodFallback)
        .await
        .unwrap();

    let observed = observed.lock().unwrap().clone().unwrap();
    assert_eq!(observed.0, ctx.error().map(ToString::to_string));
    assert_eq!(observed.1.as_ref(), ctx.result());
}
