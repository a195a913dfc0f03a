//! Domain layer
//! 개발 서버 설정 해석에 필요한 값 객체와 순수 규칙을 외부 의존성 없이 표현한다.

pub mod choice;
pub mod framework;
pub mod origin;
pub mod settings;
