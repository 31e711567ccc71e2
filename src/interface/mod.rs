//! Interface layer
//! CLI 파싱, HTTP 라우팅, 의존성 조립을 담당한다.

pub mod cli;
pub mod composition;
pub mod http;
