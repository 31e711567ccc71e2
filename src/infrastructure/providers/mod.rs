//! 원격 completion provider 어댑터 모듈.
//! OpenAI 호환 chat-completions 호출과 응답 정규화를 담당한다.

mod api_runner;
pub mod chat_completions;

pub use chat_completions::ChatCompletionsGateway;
