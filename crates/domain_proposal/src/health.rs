//! DPS health declaration
//!
//! The questionnaire is a fixed catalogue: 21 condition questions plus the
//! contact-phone entry, all keyed by the upstream's string codes. Prefill and
//! submission both match answers to the catalogue by code; positions on the
//! wire carry no meaning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationResult, MSG_REQUIRED};

/// One catalogue entry of the DPS questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthQuestion {
    pub code: &'static str,
    pub question: &'static str,
}

/// Code of the contact-phone entry, the only non-condition question.
pub const CONTACT_PHONE_CODE: &str = "telefoneContato";

/// The full questionnaire, in display order. Question texts are the
/// upstream's verbatim pt-BR wording.
pub const HEALTH_QUESTIONNAIRE: &[HealthQuestion] = &[
    HealthQuestion { code: "1", question: "Acidente Vascular Cerebral" },
    HealthQuestion { code: "2", question: "AIDS" },
    HealthQuestion { code: "3", question: "Alzheimer" },
    HealthQuestion { code: "4", question: "Arteriais Crônicas" },
    HealthQuestion { code: "5", question: "Chagas" },
    HealthQuestion { code: "6", question: "Cirrose Hepática e Varizes de Estômago" },
    HealthQuestion { code: "7", question: "Diabetes com complicações" },
    HealthQuestion { code: "8", question: "Enfisema Pulmonar e Asma" },
    HealthQuestion { code: "9", question: "Esclerose Múltipla" },
    HealthQuestion { code: "10", question: "Espondilose Anquilosante" },
    HealthQuestion {
        code: "11",
        question: "Hipertensão, Infarto do Miocárdio ou outras doenças cardiocirculatórias",
    },
    HealthQuestion { code: "12", question: "Insuficiência Coronariana" },
    HealthQuestion { code: "13", question: "L.E.R." },
    HealthQuestion { code: "14", question: "Lúpus" },
    HealthQuestion {
        code: "15",
        question: "Neurológicas ou Psiquiátricas - (vertigem, desmaio, convulsão, dificuldade de fala, doenças ou alterações mentais ou de nervos)",
    },
    HealthQuestion { code: "16", question: "Parkinson" },
    HealthQuestion { code: "17", question: "Renal Crônica (com ou sem hemodiálise)" },
    HealthQuestion { code: "18", question: "Sequelas de Acidente Vascular Celebral" },
    HealthQuestion { code: "19", question: "Shistosomose" },
    HealthQuestion {
        code: "20",
        question: "Tireóide ou outras Doenças Endócrinas com complicações",
    },
    HealthQuestion { code: "21", question: "Tumores Malignos e Câncer" },
    HealthQuestion { code: CONTACT_PHONE_CODE, question: "Telefone de Contato" },
];

/// Looks a question up by its upstream code.
pub fn question_for_code(code: &str) -> Option<&'static HealthQuestion> {
    HEALTH_QUESTIONNAIRE.iter().find(|q| q.code == code)
}

/// Condition questions only, excluding the contact-phone entry.
pub fn condition_questions() -> impl Iterator<Item = &'static HealthQuestion> {
    HEALTH_QUESTIONNAIRE
        .iter()
        .filter(|q| q.code != CONTACT_PHONE_CODE)
}

/// A questionnaire answer as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthAnswer {
    pub code: String,
    pub question: String,
    pub exists: bool,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One condition answer captured from the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionAnswer {
    pub code: String,
    pub has_condition: bool,
    #[serde(default)]
    pub details: Option<String>,
}

/// The health form as submitted by the proponent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFormSubmission {
    pub answers: Vec<ConditionAnswer>,
    pub contact_phone: String,
}

impl HealthFormSubmission {
    /// Every condition question must be answered exactly once; affirmative
    /// answers need details; the contact phone must be a valid phone.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for question in condition_questions() {
            let matches: Vec<&ConditionAnswer> = self
                .answers
                .iter()
                .filter(|a| a.code == question.code)
                .collect();
            match matches.as_slice() {
                [] => result.add_error(question.code, MSG_REQUIRED),
                [answer] => {
                    let details_blank = answer
                        .details
                        .as_deref()
                        .map_or(true, |d| d.trim().is_empty());
                    if answer.has_condition && details_blank {
                        result.add_error(question.code, MSG_REQUIRED);
                    } else if !answer.has_condition && !details_blank {
                        result.add_warning(format!(
                            "Detalhes informados para \"{}\" serão ignorados",
                            question.question
                        ));
                    }
                }
                _ => result.add_error(question.code, "Resposta duplicada."),
            }
        }

        for answer in &self.answers {
            if question_for_code(&answer.code).is_none() {
                result.add_warning(format!("Código de pergunta desconhecido: {}", answer.code));
            }
        }

        result.merge(
            crate::validation::ProposalValidator::validate_phone(&self.contact_phone)
                .relabel(CONTACT_PHONE_CODE),
        );

        result
    }

    /// Converts the form into the wire answers posted upstream. Details from
    /// negative answers are dropped; the contact phone rides as its own entry.
    pub fn into_wire(self, now: DateTime<Utc>) -> Vec<HealthAnswer> {
        let mut wire = Vec::with_capacity(self.answers.len() + 1);
        for question in condition_questions() {
            let Some(answer) = self.answers.iter().find(|a| a.code == question.code) else {
                continue;
            };
            wire.push(HealthAnswer {
                code: question.code.to_string(),
                question: question.question.to_string(),
                exists: answer.has_condition,
                created: now,
                updated: None,
                description: if answer.has_condition {
                    answer.details.clone()
                } else {
                    None
                },
            });
        }
        wire.push(HealthAnswer {
            code: CONTACT_PHONE_CODE.to_string(),
            question: "Telefone de Contato".to_string(),
            exists: true,
            created: now,
            updated: None,
            description: Some(self.contact_phone),
        });
        wire
    }
}

/// A catalogue entry with whatever answer already exists upstream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefilledQuestion {
    pub code: &'static str,
    pub question: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_condition: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The health step model served to the fill-out screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefilledHealthForm {
    pub questions: Vec<PrefilledQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl PrefilledHealthForm {
    /// Reconstructs the form from previously stored answers, matching by
    /// code. Unknown codes are ignored; unanswered questions start blank.
    pub fn from_answers(existing: &[HealthAnswer]) -> Self {
        let questions = condition_questions()
            .map(|question| {
                let answer = existing.iter().find(|a| a.code == question.code);
                PrefilledQuestion {
                    code: question.code,
                    question: question.question,
                    has_condition: answer.map(|a| a.exists),
                    details: answer.and_then(|a| a.description.clone()),
                }
            })
            .collect();

        let contact_phone = existing
            .iter()
            .find(|a| a.code == CONTACT_PHONE_CODE)
            .and_then(|a| a.description.clone());

        Self {
            questions,
            contact_phone,
        }
    }
}
