use std::cell::RefCell;
use weyouth_core::reflection::{ANSWER_PLACEHOLDER, QUESTION_MODEL, REFLECTION_PLACEHOLDER};
use weyouth_core::{
    daily_verses, GenerationError, GenerationRequest, ReflectionGateway, ReflectionService,
    TextGenerator,
};

struct ScriptedGenerator {
    reply: Result<String, GenerationError>,
    seen: RefCell<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    fn new(reply: Result<String, GenerationError>) -> Self {
        Self {
            reply,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.seen.borrow_mut().push(request.clone());
        self.reply.clone()
    }
}

#[test]
fn successful_generation_is_passed_through() {
    let service = ReflectionService::new(ScriptedGenerator::new(Ok("오늘의 묵상".to_string())));
    assert_eq!(
        service.generate_reflection(&daily_verses()[0]),
        "오늘의 묵상"
    );
}

#[test]
fn backend_failure_becomes_placeholder_text() {
    let service = ReflectionService::new(ScriptedGenerator::new(Err(GenerationError::Backend(
        "timeout".to_string(),
    ))));
    assert_eq!(
        service.generate_reflection(&daily_verses()[1]),
        REFLECTION_PLACEHOLDER
    );
    assert_eq!(service.answer_question("기도는 왜 하나요?"), ANSWER_PLACEHOLDER);
}

#[test]
fn blank_generation_becomes_placeholder_text() {
    let service = ReflectionService::new(ScriptedGenerator::new(Ok("  \n".to_string())));
    assert_eq!(service.answer_question("질문"), ANSWER_PLACEHOLDER);
}

#[test]
fn question_is_sent_to_the_question_model() {
    let generator = ScriptedGenerator::new(Ok("답변".to_string()));
    let service = ReflectionService::new(&generator);
    assert_eq!(service.answer_question("성경은 누가 썼나요?"), "답변");

    let seen = generator.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].model, QUESTION_MODEL);
    assert!(seen[0].prompt.contains("성경은 누가 썼나요?"));
}
