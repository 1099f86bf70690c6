//! HTTP-level tests for the underwriting desk API
//!
//! Every test runs the full router against in-memory ports: real JWT
//! middleware, real handlers, real domain services. Assertions read the
//! wire shapes the interface consumes, so a field rename or an error-slug
//! change fails here first.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::{DocumentId, ProposalId};
use domain_operation::{MockOperationPort, MSG_LOCK_SIGNED};
use domain_operation::edit::MSG_SAVE_SUCCESS;
use domain_proposal::ports::mock::{MockLookupPort, MockProposalDirectory, SignFailure};
use domain_proposal::ports::DomainGroup;
use domain_proposal::proposal::ProposalSummary;
use domain_proposal::status::{CoverageTrack, ProposalStatus};
use domain_proposal::validation::{MSG_DFI_BELOW_MIP, MSG_INVALID_CPF, MSG_INVALID_EMAIL};
use domain_review::archive::MSG_ARCHIVE_NOT_FOUND;
use domain_review::ports::mock::MockReportStore;
use domain_review::review::{MSG_FORBIDDEN, MSG_NO_DOCUMENTS};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::error::{MSG_SESSION_EXPIRED, NOT_UPDATABLE_TITLE};
use interface_api::handlers::proposals::MSG_INTERACTION_NOT_ALLOWED;
use interface_api::{create_router, Ports};
use test_utils::{CpfFixtures, LookupFixtures, OperationBuilder, ProposalBuilder, LMI_RANGES};

const JWT_SECRET: &str = "test-secret";
const CONTRACT: &str = "0230456789";

/// The router plus direct handles on its mocks, for seeding and for
/// asserting what the handlers actually persisted.
struct Desk {
    server: TestServer,
    proposals: Arc<MockProposalDirectory>,
    reports: Arc<MockReportStore>,
    operations: Arc<MockOperationPort>,
    lookups: Arc<MockLookupPort>,
}

fn serve(
    proposals: MockProposalDirectory,
    reports: MockReportStore,
    operations: MockOperationPort,
    lookups: MockLookupPort,
) -> Desk {
    let proposals = Arc::new(proposals);
    let reports = Arc::new(reports);
    let operations = Arc::new(operations);
    let lookups = Arc::new(lookups);
    let ports = Ports {
        proposals: proposals.clone(),
        lookups: lookups.clone(),
        reports: reports.clone(),
        operations: operations.clone(),
    };
    let config = ApiConfig {
        jwt_secret: JWT_SECRET.to_string(),
        ..ApiConfig::default()
    };
    let server = TestServer::new(create_router(ports, config)).expect("router must start");
    Desk {
        server,
        proposals,
        reports,
        operations,
        lookups,
    }
}

fn desk() -> Desk {
    serve(
        MockProposalDirectory::new(),
        MockReportStore::new(),
        MockOperationPort::new(),
        MockLookupPort::new(),
    )
}

async fn desk_with_proposal(proposal: domain_proposal::proposal::Proposal) -> Desk {
    serve(
        MockProposalDirectory::with_proposals(vec![proposal]).await,
        MockReportStore::new(),
        MockOperationPort::new(),
        MockLookupPort::new(),
    )
}

fn token(roles: &[&str]) -> String {
    create_token(
        "ana.souza",
        roles.iter().map(|r| r.to_string()).collect(),
        JWT_SECRET,
        3600,
    )
    .expect("token must encode")
}

fn proposal_url(uid: ProposalId, suffix: &str) -> String {
    format!("/api/v1/proposals/{}{}", uid.as_uuid(), suffix)
}

/// All 21 condition questions answered negative, plus a valid phone.
fn clean_health_form() -> Value {
    let answers: Vec<Value> = (1..=21)
        .map(|code| json!({ "code": code.to_string(), "hasCondition": false }))
        .collect();
    json!({ "answers": answers, "contactPhone": "(11) 98765-4321" })
}

fn field_message<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body["details"]
        .as_array()?
        .iter()
        .find(|e| e["field"] == field)?["message"]
        .as_str()
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_missing_bearer_is_unauthorized() {
        let desk = desk();

        let response = desk.server.get("/api/v1/proposals").await;

        assert_eq!(response.status_code(), 401);
        let body: Value = response.json();
        assert_eq!(body["error"], "session_expired");
        assert_eq!(body["message"], MSG_SESSION_EXPIRED);
        assert_eq!(body["redirect"], "/logout");
    }

    #[tokio::test]
    async fn test_garbage_bearer_is_unauthorized() {
        let desk = desk();

        let response = desk
            .server
            .get("/api/v1/proposals")
            .authorization_bearer("not-a-jwt")
            .await;

        assert_eq!(response.status_code(), 401);
        assert_eq!(response.json::<Value>()["error"], "session_expired");
    }

    #[tokio::test]
    async fn test_expired_upstream_session_redirects_to_login() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;
        desk.proposals.expire_session(true).await;

        let response = desk
            .server
            .get(&proposal_url(uid, ""))
            .authorization_bearer(token(&["admin"]))
            .await;

        assert_eq!(response.status_code(), 401);
        let body: Value = response.json();
        assert_eq!(body["error"], "session_expired");
        assert_eq!(body["redirect"], "/logout");
    }

    #[tokio::test]
    async fn test_health_endpoints_are_public() {
        let desk = desk();

        let health = desk.server.get("/health").await;
        assert_eq!(health.status_code(), 200);
        assert_eq!(health.json::<Value>()["status"], "healthy");

        let ready = desk.server.get("/ready").await;
        assert_eq!(ready.status_code(), 200);
        assert_eq!(ready.json::<Value>()["status"], "ready");
    }
}

mod proposal_listing {
    use super::*;

    #[tokio::test]
    async fn test_search_strips_the_cpf_mask() {
        let principal = ProposalBuilder::new().build();
        let other = ProposalBuilder::new()
            .with_document(CpfFixtures::co_participant())
            .build();
        let desk = serve(
            MockProposalDirectory::with_proposals(vec![principal, other]).await,
            MockReportStore::new(),
            MockOperationPort::new(),
            MockLookupPort::new(),
        );

        let response = desk
            .server
            .get("/api/v1/proposals")
            .add_query_param("document", CpfFixtures::principal_masked())
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["totalItems"], 1);
        assert_eq!(
            body["items"][0]["customer"]["document"],
            CpfFixtures::principal()
        );
    }

    #[tokio::test]
    async fn test_search_rejects_an_invalid_cpf() {
        let desk = desk();

        let response = desk
            .server
            .get("/api/v1/proposals")
            .add_query_param("document", CpfFixtures::invalid())
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(field_message(&body, "cpf"), Some(MSG_INVALID_CPF));
    }

    #[tokio::test]
    async fn test_canceled_proposals_live_on_their_own_listing() {
        let active = ProposalBuilder::new().build();
        let canceled = ProposalBuilder::new()
            .with_document(CpfFixtures::co_participant())
            .build();
        let summary = ProposalSummary {
            uid: canceled.uid,
            code: canceled.code.clone(),
            customer: canceled.customer.clone(),
            product: canceled.product.clone(),
            kind: canceled.kind.clone(),
            status: canceled.status.clone(),
            lmi: canceled.lmi.clone(),
            created_at: canceled.created,
        };
        let desk = desk_with_proposal(active).await;
        desk.proposals.push_canceled(summary).await;

        let response = desk
            .server
            .get("/api/v1/proposals/canceled")
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["totalItems"], 1);
        assert_eq!(
            body["items"][0]["customer"]["document"],
            CpfFixtures::co_participant()
        );
    }
}

mod proposal_creation {
    use super::*;

    fn valid_body() -> Value {
        json!({
            "document": CpfFixtures::principal_masked(),
            "name": "Ana Beatriz Souza",
            "email": "ana.souza@exemplo.com.br",
            "birthDate": "1985-03-12",
            "productId": LookupFixtures::product().uid,
            "lmiRangeId": 3,
            "capitalMip": "250000",
            "capitalDfi": "400000",
        })
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_upstream() {
        let desk = desk();

        let mut body = valid_body();
        body["document"] = json!(CpfFixtures::invalid());
        body["capitalDfi"] = json!("100000");
        let response = desk
            .server
            .post("/api/v1/proposals")
            .authorization_bearer(token(&["vendedor"]))
            .json(&body)
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(field_message(&body, "document"), Some(MSG_INVALID_CPF));
        assert_eq!(field_message(&body, "capitalDfi"), Some(MSG_DFI_BELOW_MIP));

        let listing = desk
            .server
            .get("/api/v1/proposals")
            .authorization_bearer(token(&["vendedor"]))
            .await;
        assert_eq!(listing.json::<Value>()["totalItems"], 0);
    }

    #[tokio::test]
    async fn test_creates_and_serves_the_proposal() {
        let desk = desk();

        let created = desk
            .server
            .post("/api/v1/proposals")
            .authorization_bearer(token(&["vendedor"]))
            .json(&valid_body())
            .await;

        assert_eq!(created.status_code(), 201);
        let uid = created.json::<Value>()["uid"].as_str().unwrap().to_string();

        let detail = desk
            .server
            .get(&format!("/api/v1/proposals/{uid}"))
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(detail.status_code(), 200);
        let body: Value = detail.json();
        assert_eq!(body["customer"]["document"], CpfFixtures::principal());
        assert_eq!(body["status"]["id"], 10);
        assert_eq!(body["capitalMip"]["amount"], "250000");
        assert_eq!(body["history"][0]["description"], "Proposta criada");
    }

    #[tokio::test]
    async fn test_unknown_proposal_is_not_found() {
        let desk = desk();

        let response = desk
            .server
            .get(&proposal_url(ProposalId::new(), ""))
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(response.status_code(), 404);
        assert_eq!(response.json::<Value>()["error"], "not_found");
    }
}

mod fillout {
    use super::*;

    #[tokio::test]
    async fn test_opens_on_the_health_step() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .get(&proposal_url(uid, "/fillout"))
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["step"], "health");
        assert_eq!(body["health"]["questions"].as_array().unwrap().len(), 21);
        assert!(body.get("detailLink").is_none());
    }

    #[tokio::test]
    async fn test_health_submission_signs_and_finishes() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/health"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&clean_health_form())
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["step"], "finished");
        assert_eq!(body["sign"]["signed"], true);
        assert_eq!(
            body["detailLink"],
            format!("/dps/details/{}", uid.as_uuid())
        );

        let stored = desk.proposals.stored(uid).await.unwrap();
        assert_eq!(stored.status_code(), ProposalStatus::Signed);
    }

    #[tokio::test]
    async fn test_every_condition_question_must_be_answered() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let body = json!({
            "answers": [{ "code": "1", "hasCondition": false }],
            "contactPhone": "(11) 98765-4321",
        });
        let response = desk
            .server
            .post(&proposal_url(uid, "/health"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&body)
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        // 20 of the 21 condition questions went unanswered.
        assert_eq!(body["details"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_signature_failure_is_advisory() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;
        desk.proposals
            .fail_signs_with(Some(SignFailure::Connection))
            .await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/health"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&clean_health_form())
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["step"], "finished");
        assert_eq!(body["sign"]["signed"], false);
        assert!(body["sign"]["message"].is_string());

        let stored = desk.proposals.stored(uid).await.unwrap();
        assert_eq!(stored.status_code(), ProposalStatus::AwaitingFillout);
    }
}

mod interactions {
    use super::*;

    #[tokio::test]
    async fn test_complement_note_is_appended_while_awaiting() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingComplement)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/interactions"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({ "description": "Segue exame complementar" }))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["canAdd"], true);
        let items = body["items"].as_array().unwrap();
        assert_eq!(
            items.last().unwrap()["description"],
            "Segue exame complementar"
        );
    }

    #[tokio::test]
    async fn test_notes_are_refused_outside_the_complement_stage() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/interactions"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({ "description": "Nota fora de hora" }))
            .await;

        assert_eq!(response.status_code(), 409);
        let body: Value = response.json();
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], MSG_INTERACTION_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_blank_notes_are_rejected() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingComplement)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/interactions"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({ "description": "   " }))
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert!(field_message(&body, "description").is_some());
    }

    #[tokio::test]
    async fn test_blank_history_entries_are_hidden() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingMedicalAnalysis)
            .with_history_entry(ProposalStatus::Signed, "", None)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .get(&proposal_url(uid, "/interactions"))
            .authorization_bearer(token(&["subscritor-med"]))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["canAdd"], false);
    }
}

mod report_panels {
    use super::*;

    #[tokio::test]
    async fn test_medical_panel_for_the_medical_reviewer() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingMedicalAnalysis)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .get(&proposal_url(uid, "/reports/mip"))
            .authorization_bearer(token(&["subscritor-med"]))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["track"], "MIP");
        assert_eq!(body["capabilities"]["canApprove"], true);
        assert_eq!(body["capabilities"]["canReject"], true);
        assert_eq!(body["capabilities"]["canUpload"], false);
        assert_eq!(body["capabilities"]["canDelete"], false);
        assert_eq!(
            body["confirmPrompt"],
            "Confirma o envio de laudos e complementos médicos?"
        );
    }

    #[tokio::test]
    async fn test_upload_requires_an_upload_role() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingMedicalAnalysis)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/mip"))
            .authorization_bearer(token(&["subscritor-med"]))
            .json(&json!({
                "documentName": "laudo-medico.pdf",
                "message": "Laudo cardiológico",
                "content": "JVBERi0xLjc=",
            }))
            .await;

        assert_eq!(response.status_code(), 403);
        let body: Value = response.json();
        assert_eq!(body["error"], "forbidden");
        assert_eq!(body["message"], MSG_FORBIDDEN);
    }

    #[tokio::test]
    async fn test_upload_then_panel_lists_the_document() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let upload = desk
            .server
            .post(&proposal_url(uid, "/reports/mip"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({
                "documentName": "laudo-medico.pdf",
                "message": "Laudo cardiológico",
                "content": "JVBERi0xLjc=",
            }))
            .await;
        assert_eq!(upload.status_code(), 201);

        let panel = desk
            .server
            .get(&proposal_url(uid, "/reports/mip"))
            .add_query_param("requireUpload", true)
            .authorization_bearer(token(&["vendedor"]))
            .await;

        assert_eq!(panel.status_code(), 200);
        let body: Value = panel.json();
        let documents = body["documents"].as_array().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["documentName"], "laudo-medico.pdf");
        assert_eq!(documents[0]["description"], "MIP: Laudo cardiológico");
        assert_eq!(body["capabilities"]["canUpload"], true);
        assert_eq!(body["capabilities"]["canConclude"], true);
        assert_eq!(body["capabilities"]["canApprove"], false);
    }

    #[tokio::test]
    async fn test_medical_rejection_records_the_verdict() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingMedicalAnalysis)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/mip/review"))
            .authorization_bearer(token(&["admin"]))
            .json(&json!({
                "decision": "reject",
                "justification": "documentação incompleta",
            }))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["statusId"], 37);
        assert_eq!(body["type"], "MIP");
        assert_eq!(
            body["description"],
            "Análise de MIP concluída: NEGADA - documentação incompleta"
        );

        let stored = desk.proposals.stored(uid).await.unwrap();
        assert_eq!(stored.status_code(), ProposalStatus::MedicalRejected);
        assert_eq!(
            stored.history.last().unwrap().description,
            "Análise de MIP concluída: NEGADA - documentação incompleta"
        );
    }

    #[tokio::test]
    async fn test_property_approval_rides_the_dfi_lane() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::Signed)
            .with_dfi_status(ProposalStatus::AwaitingDfiAnalysis)
            .with_history_entry(ProposalStatus::Signed, "Proposta assinada", None)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/dfi/review"))
            .authorization_bearer(token(&["subscritor"]))
            .json(&json!({ "decision": "approve" }))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["statusId"], 35);
        assert_eq!(body["type"], "DFI");
        assert_eq!(body["description"], "Análise de DFI concluída: APROVADA");

        let stored = desk.proposals.stored(uid).await.unwrap();
        // The verdict moves the DFI lane only; the main status stays put.
        assert_eq!(stored.status_code(), ProposalStatus::Signed);
        assert_eq!(stored.dfi_status.unwrap().id, 35);
    }

    #[tokio::test]
    async fn test_review_is_forbidden_for_sales() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingMedicalAnalysis)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/mip/review"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({ "decision": "approve" }))
            .await;

        assert_eq!(response.status_code(), 403);
        assert_eq!(response.json::<Value>()["message"], MSG_FORBIDDEN);
    }

    #[tokio::test]
    async fn test_conclude_needs_at_least_one_document() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingComplement)
            .build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/mip/conclude"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({}))
            .await;

        assert_eq!(response.status_code(), 422);
        let body: Value = response.json();
        assert_eq!(body["error"], "business_rule");
        assert_eq!(body["message"], MSG_NO_DOCUMENTS);
    }

    #[tokio::test]
    async fn test_conclude_sends_the_proposal_to_analysis() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::AwaitingComplement)
            .build();
        let uid = proposal.uid;
        let document = sample_document();
        let desk = serve(
            MockProposalDirectory::with_proposals(vec![proposal]).await,
            MockReportStore::with_documents(uid, CoverageTrack::Mip, vec![document]).await,
            MockOperationPort::new(),
            MockLookupPort::new(),
        );

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/mip/conclude"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({ "justification": "Exames anexados" }))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["statusId"], 4);
        assert_eq!(body["description"], "Aguardando análise DPS");

        let stored = desk.proposals.stored(uid).await.unwrap();
        assert_eq!(
            stored.status_code(),
            ProposalStatus::AwaitingMedicalAnalysis
        );
    }

    #[tokio::test]
    async fn test_refused_transition_expands_the_checklist() {
        // Fill-out cannot jump straight to medical analysis, so the upstream
        // refuses the conclude and the response explains what to check.
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let document = sample_document();
        let desk = serve(
            MockProposalDirectory::with_proposals(vec![proposal]).await,
            MockReportStore::with_documents(uid, CoverageTrack::Mip, vec![document]).await,
            MockOperationPort::new(),
            MockLookupPort::new(),
        );

        let response = desk
            .server
            .post(&proposal_url(uid, "/reports/mip/conclude"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({}))
            .await;

        assert_eq!(response.status_code(), 422);
        let body: Value = response.json();
        assert_eq!(body["error"], "proposal_not_updatable");
        assert_eq!(body["title"], NOT_UPDATABLE_TITLE);
        assert_eq!(body["details"].as_array().unwrap().len(), 4);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("não pode ser atualizada"));
    }

    #[tokio::test]
    async fn test_archive_streams_the_decoded_pdf() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let document = sample_document();
        let document_uid = document.uid;
        let desk = serve(
            MockProposalDirectory::with_proposals(vec![proposal]).await,
            MockReportStore::with_documents(uid, CoverageTrack::Dfi, vec![document]).await,
            MockOperationPort::new(),
            MockLookupPort::new(),
        );
        desk.reports.set_content(document_uid, "JVBERi0xLjc=").await;

        let response = desk
            .server
            .get(&proposal_url(
                uid,
                &format!("/reports/dfi/{}/content", document_uid.as_uuid()),
            ))
            .authorization_bearer(token(&["subscritor"]))
            .await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_missing_archive_is_not_found() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let document = sample_document();
        let document_uid = document.uid;
        let desk = serve(
            MockProposalDirectory::with_proposals(vec![proposal]).await,
            MockReportStore::with_documents(uid, CoverageTrack::Dfi, vec![document]).await,
            MockOperationPort::new(),
            MockLookupPort::new(),
        );

        let response = desk
            .server
            .get(&proposal_url(
                uid,
                &format!("/reports/dfi/{}/content", document_uid.as_uuid()),
            ))
            .authorization_bearer(token(&["subscritor"]))
            .await;

        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], MSG_ARCHIVE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_gated_to_property_reviewers() {
        let proposal = ProposalBuilder::new()
            .with_status(ProposalStatus::Signed)
            .with_dfi_status(ProposalStatus::AwaitingDfiAnalysis)
            .build();
        let uid = proposal.uid;
        let document = sample_document();
        let document_uid = document.uid;
        let desk = serve(
            MockProposalDirectory::with_proposals(vec![proposal]).await,
            MockReportStore::with_documents(uid, CoverageTrack::Dfi, vec![document]).await,
            MockOperationPort::new(),
            MockLookupPort::new(),
        );

        let denied = desk
            .server
            .delete(&proposal_url(
                uid,
                &format!("/documents/{}", document_uid.as_uuid()),
            ))
            .authorization_bearer(token(&["vendedor"]))
            .await;
        assert_eq!(denied.status_code(), 403);
        assert_eq!(desk.reports.document_count(uid, CoverageTrack::Dfi).await, 1);

        let deleted = desk
            .server
            .delete(&proposal_url(
                uid,
                &format!("/documents/{}", document_uid.as_uuid()),
            ))
            .authorization_bearer(token(&["subscritor"]))
            .await;
        assert_eq!(deleted.status_code(), 204);
        assert_eq!(desk.reports.document_count(uid, CoverageTrack::Dfi).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_report_type_is_not_found() {
        let proposal = ProposalBuilder::new().build();
        let uid = proposal.uid;
        let desk = desk_with_proposal(proposal).await;

        let response = desk
            .server
            .get(&proposal_url(uid, "/reports/xyz"))
            .authorization_bearer(token(&["admin"]))
            .await;

        assert_eq!(response.status_code(), 404);
        assert_eq!(
            response.json::<Value>()["message"],
            "tipo de laudo desconhecido: XYZ"
        );
    }

    fn sample_document() -> domain_review::ReportDocument {
        domain_review::ReportDocument {
            uid: DocumentId::new(),
            document_name: "laudo.pdf".to_string(),
            document_url: "https://storage.local/laudo.pdf".to_string(),
            description: "MIP: laudo".to_string(),
            created_by_user: None,
            created: test_utils::TemporalFixtures::created(),
            updated: None,
        }
    }
}

mod operations {
    use super::*;

    fn edit_body(confirmed: bool, deadline: u32) -> Value {
        json!({
            "confirmed": confirmed,
            "totalParticipantsExpected": 2,
            "productUid": LookupFixtures::product().uid,
            "deadlineMonths": deadline,
            "propertyTypeId": 1,
            "operationValue": { "amount": "380000", "currency": "BRL" },
            "capitalMip": { "amount": "250000", "currency": "BRL" },
            "capitalDfi": { "amount": "400000", "currency": "BRL" },
        })
    }

    async fn desk_with_operation(operation: domain_operation::Operation) -> Desk {
        serve(
            MockProposalDirectory::new(),
            MockReportStore::new(),
            MockOperationPort::with_operation(operation).await,
            MockLookupPort::new(),
        )
    }

    #[tokio::test]
    async fn test_edit_page_requires_a_sales_role() {
        let desk = desk_with_operation(OperationBuilder::new(CONTRACT).build()).await;

        let denied = desk
            .server
            .get(&format!("/api/v1/operations/{CONTRACT}"))
            .authorization_bearer(token(&["subscritor"]))
            .await;
        assert_eq!(denied.status_code(), 403);
        assert_eq!(denied.json::<Value>()["message"], MSG_FORBIDDEN);

        let page = desk
            .server
            .get(&format!("/api/v1/operations/{CONTRACT}"))
            .authorization_bearer(token(&["vendedor"]))
            .await;
        assert_eq!(page.status_code(), 200);
        let body: Value = page.json();
        assert_eq!(body["lock"]["editable"], true);
        assert_eq!(body["draft"]["deadlineMonths"], 240);
    }

    #[tokio::test]
    async fn test_save_previews_before_confirming() {
        let desk = desk_with_operation(OperationBuilder::new(CONTRACT).build()).await;

        let response = desk
            .server
            .put(&format!("/api/v1/operations/{CONTRACT}"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&edit_body(false, 360))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["outcome"], "confirmationRequired");
        let changes = body["changes"].as_array().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0]["field"], "deadlineMonths");
        assert_eq!(changes[0]["from"], "240");
        assert_eq!(changes[0]["to"], "360");

        let stored = desk
            .operations
            .stored(&core_kernel::OperationNumber::new(CONTRACT))
            .await
            .unwrap();
        assert_eq!(stored.participants[0].deadline_months, Some(240));
    }

    #[tokio::test]
    async fn test_confirmed_save_applies_to_every_participant() {
        let principal = ProposalBuilder::new().build();
        let co = ProposalBuilder::new().as_co_participant(CONTRACT).build();
        let operation = OperationBuilder::new(CONTRACT)
            .with_participant(principal)
            .with_participant(co)
            .build();
        let desk = desk_with_operation(operation).await;

        let response = desk
            .server
            .put(&format!("/api/v1/operations/{CONTRACT}"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&edit_body(true, 360))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["outcome"], "saved");
        assert_eq!(body["message"], MSG_SAVE_SUCCESS);

        let stored = desk
            .operations
            .stored(&core_kernel::OperationNumber::new(CONTRACT))
            .await
            .unwrap();
        assert_eq!(stored.participants.len(), 2);
        for participant in &stored.participants {
            assert_eq!(participant.deadline_months, Some(360));
        }
    }

    #[tokio::test]
    async fn test_signed_participant_locks_the_save() {
        let signed = ProposalBuilder::new()
            .with_status(ProposalStatus::Signed)
            .build();
        let operation = OperationBuilder::new(CONTRACT)
            .with_participant(signed)
            .build();
        let desk = desk_with_operation(operation).await;

        let response = desk
            .server
            .put(&format!("/api/v1/operations/{CONTRACT}"))
            .authorization_bearer(token(&["vendedor"]))
            .json(&edit_body(true, 360))
            .await;

        assert_eq!(response.status_code(), 409);
        let body: Value = response.json();
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], MSG_LOCK_SIGNED);
    }

    #[tokio::test]
    async fn test_contact_stays_editable_after_the_lock() {
        let signed = ProposalBuilder::new()
            .with_status(ProposalStatus::Signed)
            .build();
        let participant_uid = signed.uid;
        let operation = OperationBuilder::new(CONTRACT)
            .with_participant(signed)
            .build();
        let desk = desk_with_operation(operation).await;

        let response = desk
            .server
            .put(&format!(
                "/api/v1/operations/participants/{}/contact",
                participant_uid.as_uuid()
            ))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({
                "socialName": "Ana B.",
                "profession": "Engenheira civil",
                "email": "novo@exemplo.com.br",
                "phone": "(11) 91234-5678",
            }))
            .await;

        assert_eq!(response.status_code(), 204);
        let stored = desk
            .operations
            .stored(&core_kernel::OperationNumber::new(CONTRACT))
            .await
            .unwrap();
        assert_eq!(stored.participants[0].customer.email, "novo@exemplo.com.br");
        assert_eq!(
            stored.participants[0].customer.social_name.as_deref(),
            Some("Ana B.")
        );
    }

    #[tokio::test]
    async fn test_contact_email_shape_is_checked() {
        let desk = desk_with_operation(OperationBuilder::new(CONTRACT).build()).await;

        let response = desk
            .server
            .put(&format!(
                "/api/v1/operations/participants/{}/contact",
                ProposalId::new().as_uuid()
            ))
            .authorization_bearer(token(&["vendedor"]))
            .json(&json!({
                "profession": "Engenheira civil",
                "email": "sem-arroba",
                "phone": "(11) 91234-5678",
            }))
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(field_message(&body, "email"), Some(MSG_INVALID_EMAIL));
    }
}

mod lookups {
    use super::*;

    #[tokio::test]
    async fn test_reference_data_is_served_per_group() {
        let desk = desk();
        desk.lookups
            .set_group(DomainGroup::LmiValues, LMI_RANGES.clone())
            .await;
        desk.lookups
            .set_products(vec![LookupFixtures::product()])
            .await;

        let lmi = desk
            .server
            .get("/api/v1/lookups/lmi-options")
            .authorization_bearer(token(&["vendedor"]))
            .await;
        assert_eq!(lmi.status_code(), 200);
        assert_eq!(lmi.json::<Value>().as_array().unwrap().len(), 3);

        let products = desk
            .server
            .get("/api/v1/lookups/products")
            .authorization_bearer(token(&["vendedor"]))
            .await;
        assert_eq!(products.status_code(), 200);
        assert_eq!(
            products.json::<Value>()[0]["name"],
            "Prestamista Habitacional"
        );

        // Groups nobody seeded answer empty instead of erroring.
        let property_types = desk
            .server
            .get("/api/v1/lookups/property-types")
            .authorization_bearer(token(&["vendedor"]))
            .await;
        assert_eq!(property_types.status_code(), 200);
        assert_eq!(property_types.json::<Value>().as_array().unwrap().len(), 0);
    }
}
