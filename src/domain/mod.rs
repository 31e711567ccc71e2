//! Domain layer
//! persona 카탈로그와 completion 값 객체를 외부 의존성 없이 표현한다.

pub mod catalog;
pub mod completion;
pub mod personas;
