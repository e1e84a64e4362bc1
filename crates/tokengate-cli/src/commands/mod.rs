//! CLI 명령어 구현 모듈.
//!
//! 각 명령은 출력할 JSON 값을 반환하고, 출력은 `main` 에서 담당합니다.

pub mod hash;
pub mod token;
