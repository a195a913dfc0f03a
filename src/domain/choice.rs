//! 여러 프레임워크가 감지되었을 때 사용자에게 보여줄 선택지 구성 규칙.

use crate::domain::framework::FrameworkDescriptor;

/// 선택 목록의 한 항목(표시 라벨 + 선택 시 사용할 기술자).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkChoice {
    pub label: String,
    pub descriptor: FrameworkDescriptor,
}

/// (프레임워크, 감시 명령) 쌍마다 선택지를 하나씩 만든다.
///
/// 라벨 형식: `[이름] 기본명령 감시인자...`
/// 감시 인자가 붙은 선택지는 기술자의 명령을 해당 조합 하나로 좁힌다.
pub fn build_choices(descriptors: &[FrameworkDescriptor]) -> Vec<FrameworkChoice> {
    let mut choices = Vec::new();

    for descriptor in descriptors {
        let primary = descriptor.primary_command().unwrap_or_default();

        if descriptor.watch.commands.is_empty() {
            choices.push(FrameworkChoice {
                label: format_label(&descriptor.name, primary, &[]),
                descriptor: descriptor.clone(),
            });
            continue;
        }

        for args in &descriptor.watch.commands {
            let mut narrowed = descriptor.clone();
            if !args.is_empty() {
                narrowed.dev.commands = vec![join_command(primary, args)];
            }
            choices.push(FrameworkChoice {
                label: format_label(&descriptor.name, primary, args),
                descriptor: narrowed,
            });
        }
    }

    choices
}

fn format_label(name: &str, primary: &str, args: &[String]) -> String {
    format!("[{name}] {}", join_command(primary, args))
}

fn join_command(primary: &str, args: &[String]) -> String {
    let mut out = primary.to_string();
    for arg in args {
        out.push(' ');
        out.push_str(arg);
    }
    out
}

/// 입력 문자가 라벨 안에 순서대로 나타나면 일치로 본다(대소문자 무시).
/// 빈 입력은 모든 라벨과 일치한다.
pub fn fuzzy_match(query: &str, label: &str) -> bool {
    let mut haystack = label.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .all(|needle| haystack.any(|c| c == needle))
}
