//! Devotional reflection and Bible Q&A through an external text generator.
//!
//! # Responsibility
//! - Build the prompts sent to the generation backend.
//! - Turn every backend failure into user-displayable placeholder text.
//!
//! # Invariants
//! - `ReflectionGateway` methods never return an error; callers always get
//!   text they can render.
//! - Prompts and answers are not logged, only their outcome.

pub mod verses;

use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use verses::BibleVerse;

pub const REFLECTION_MODEL: &str = "gemini-3-flash-preview";
pub const QUESTION_MODEL: &str = "gemini-3-pro-preview";

pub const REFLECTION_PLACEHOLDER: &str =
    "묵상 내용을 불러오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";
pub const ANSWER_PLACEHOLDER: &str =
    "죄송해요, 답변을 준비하는 중에 문제가 생겼어요. 나중에 다시 물어봐 줄래?";

/// One request to the generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: &'static str,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub thinking_budget: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Backend could not be reached or rejected the call.
    Backend(String),
    /// Backend answered without text.
    EmptyResponse,
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "text generation failed: {message}"),
            Self::EmptyResponse => write!(f, "text generation returned no text"),
        }
    }
}

impl Error for GenerationError {}

/// Backend contract implemented by embedders (HTTP client, mock, ...).
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        (**self).generate(request)
    }
}

/// Infallible reflection boundary consumed by the UI.
pub trait ReflectionGateway {
    fn generate_reflection(&self, verse: &BibleVerse) -> String;
    fn answer_question(&self, question: &str) -> String;
}

/// `ReflectionGateway` over any `TextGenerator`.
pub struct ReflectionService<T: TextGenerator> {
    generator: T,
}

impl<T: TextGenerator> ReflectionService<T> {
    pub fn new(generator: T) -> Self {
        Self { generator }
    }

    fn run(&self, request: &GenerationRequest, event: &str, placeholder: &str) -> String {
        let outcome = self
            .generator
            .generate(request)
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(GenerationError::EmptyResponse)
                } else {
                    Ok(text)
                }
            });
        match outcome {
            Ok(text) => text,
            Err(err) => {
                error!(
                    "event={event} module=reflection status=error model={} error={}",
                    request.model, err
                );
                placeholder.to_string()
            }
        }
    }
}

impl<T: TextGenerator> ReflectionGateway for ReflectionService<T> {
    fn generate_reflection(&self, verse: &BibleVerse) -> String {
        let request = reflection_request(verse);
        self.run(&request, "reflection_generate", REFLECTION_PLACEHOLDER)
    }

    fn answer_question(&self, question: &str) -> String {
        let request = question_request(question);
        self.run(&request, "question_answer", ANSWER_PLACEHOLDER)
    }
}

/// Three-part youth reflection: meditation, application, prayer.
pub fn reflection_request(verse: &BibleVerse) -> GenerationRequest {
    GenerationRequest {
        model: REFLECTION_MODEL,
        prompt: format!(
            "다음 성경 구절을 바탕으로 청소년들이 공감할 수 있는 묵상 글을 작성해줘.\n\
             구절: {} ({})\n\
             구성:\n\
             1. 오늘의 묵상 (3-4문장)\n\
             2. 삶에 적용하기 (1문장)\n\
             3. 오늘의 기도 (1문장)",
            verse.text, verse.reference
        ),
        temperature: 0.7,
        max_output_tokens: 800,
        thinking_budget: None,
    }
}

pub fn question_request(question: &str) -> GenerationRequest {
    GenerationRequest {
        model: QUESTION_MODEL,
        prompt: format!(
            "당신은 친절하고 지혜로운 교회 선생님입니다. 청소년의 눈높이에서 다음 질문에 대해 \
             성경적이고 따뜻하게 답해주세요: {question}"
        ),
        temperature: 0.7,
        max_output_tokens: 1000,
        thinking_budget: Some(4000),
    }
}

#[cfg(test)]
mod tests {
    use super::verses::daily_verses;
    use super::{question_request, reflection_request, QUESTION_MODEL, REFLECTION_MODEL};

    #[test]
    fn reflection_prompt_embeds_verse_and_reference() {
        let verse = &daily_verses()[0];
        let request = reflection_request(verse);
        assert_eq!(request.model, REFLECTION_MODEL);
        assert!(request.prompt.contains(verse.text));
        assert!(request.prompt.contains(verse.reference));
        assert!(request.prompt.contains("3. 오늘의 기도"));
        assert_eq!(request.max_output_tokens, 800);
        assert_eq!(request.thinking_budget, None);
    }

    #[test]
    fn question_prompt_uses_deeper_model() {
        let request = question_request("천국은 어떤 곳인가요?");
        assert_eq!(request.model, QUESTION_MODEL);
        assert!(request.prompt.ends_with("천국은 어떤 곳인가요?"));
        assert_eq!(request.thinking_budget, Some(4000));
    }
}
