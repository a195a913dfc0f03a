//! 프레임워크 선택 프롬프트.
//! 입력하는 동안 필터로 후보를 좁히고 방향키로 고른다.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Result, bail};
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::ports::{ChoiceFilter, FrameworkPicker};
use crate::domain::choice::FrameworkChoice;

// 입력 영역 기본 높이: 안내줄 + 입력줄 + 구분선
const PANEL_BASE_HEIGHT: usize = 3;
const MAX_VISIBLE_CHOICES: usize = 10;

/// 터미널 선택 어댑터.
/// - TTY + 지원 터미널: 실시간 필터 + 방향키 선택
/// - non-TTY/미지원 터미널: 번호 목록 + 라인 입력
pub struct TerminalPicker;

impl FrameworkPicker for TerminalPicker {
    fn choose(
        &self,
        message: &str,
        choices: &[FrameworkChoice],
        filter: ChoiceFilter,
    ) -> Result<FrameworkChoice> {
        if choices.is_empty() {
            bail!("no start commands to choose from");
        }

        if supports_interactive_input() {
            match choose_interactive(message, choices, filter) {
                Ok(Some(idx)) => return Ok(choices[idx].clone()),
                Ok(None) => bail!("selection cancelled"),
                Err(err) => {
                    debug!(error = %err, "interactive picker unavailable, falling back to line input");
                }
            }
        }

        let stdin = io::stdin();
        choose_from_list(message, choices, filter, &mut stdin.lock(), &mut io::stderr())
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return false;
    }

    if let Ok(term) = env::var("TERM") && term.eq_ignore_ascii_case("dumb") {
        return false;
    }

    true
}

/// 번호 목록을 출력하고 한 줄을 읽는다.
/// 숫자는 1부터 시작하는 번호, 그 외 입력은 필터에 걸리는 첫 후보를 고른다.
fn choose_from_list<R: BufRead, W: Write>(
    message: &str,
    choices: &[FrameworkChoice],
    filter: ChoiceFilter,
    input: &mut R,
    output: &mut W,
) -> Result<FrameworkChoice> {
    writeln!(output, "? {message}")?;
    for (idx, choice) in choices.iter().enumerate() {
        writeln!(output, "  {}) {}", idx + 1, choice.label)?;
    }
    write!(output, "Select [1-{}]: ", choices.len())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no selection received");
    }
    let typed = trim_newline(line);
    let typed = typed.trim();

    if let Ok(number) = typed.parse::<usize>() {
        return match number.checked_sub(1).and_then(|idx| choices.get(idx)) {
            Some(choice) => Ok(choice.clone()),
            None => bail!("selection {number} is out of range (1-{})", choices.len()),
        };
    }

    match choices.iter().find(|c| filter(typed, &c.label)) {
        Some(choice) => Ok(choice.clone()),
        None => bail!("no start command matches \"{typed}\""),
    }
}

/// 선택한 후보의 인덱스를 반환한다. 취소하면 `None`.
fn choose_interactive(
    message: &str,
    choices: &[FrameworkChoice],
    filter: ChoiceFilter,
) -> Result<Option<usize>> {
    let mut stderr = io::stderr();
    let _guard = InputGuard::enter(&mut stderr)?;

    let mut input = String::new();
    let mut selected = 0usize;

    loop {
        let visible: Vec<usize> = (0..choices.len())
            .filter(|&idx| filter(&input, &choices[idx].label))
            .collect();
        if visible.is_empty() {
            selected = 0;
        } else if selected >= visible.len() {
            selected = visible.len() - 1;
        }

        render_frame(&mut stderr, message, &input, choices, &visible, selected)?;

        match event::read()? {
            Event::Paste(text) => input.push_str(&text),
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Enter => {
                        if let Some(&idx) = visible.get(selected) {
                            clear_panel(&mut stderr, choices.len())?;
                            return Ok(Some(idx));
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Up => {
                        selected = selected.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        if !visible.is_empty() {
                            selected = (selected + 1).min(visible.len() - 1);
                        }
                    }
                    KeyCode::Esc => {
                        clear_panel(&mut stderr, choices.len())?;
                        return Ok(None);
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        clear_panel(&mut stderr, choices.len())?;
                        return Ok(None);
                    }
                    KeyCode::Char(ch) => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL)
                            && !key.modifiers.contains(KeyModifiers::ALT)
                        {
                            input.push(ch);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn render_frame(
    out: &mut io::Stderr,
    message: &str,
    input: &str,
    choices: &[FrameworkChoice],
    visible: &[usize],
    selected: usize,
) -> Result<()> {
    let (w, _) = terminal::size().unwrap_or((120, 40));
    let width = (w as usize).max(20);
    let (panel_top, total_rows) = panel_rows(choices.len());

    // 선택 항목이 항상 보이도록 목록 창을 이동한다.
    let window = visible.len().min(MAX_VISIBLE_CHOICES);
    let offset = (selected + 1).saturating_sub(window);
    let list_rows = window.max(1);

    for row in panel_top..total_rows {
        clear_line_at(out, row as u16)?;
    }

    let message_row = panel_top;
    let input_row = panel_top + 1;
    let divider_row = panel_top + 2;

    draw_line_at_with_fg(
        out,
        message_row as u16,
        &format!("? {message} (↑↓ select · Enter confirm · Esc cancel)"),
        width,
        Color::Cyan,
    )?;
    draw_panel_line_at(out, input_row as u16, &render_prompt_line(input, width), width)?;
    draw_panel_line_at(out, divider_row as u16, &"─".repeat(width), width)?;

    if visible.is_empty() {
        draw_line_at_with_fg(
            out,
            (divider_row + 1) as u16,
            "  no matching start command",
            width,
            Color::Yellow,
        )?;
    }

    for (row, &idx) in visible.iter().skip(offset).take(list_rows).enumerate() {
        let is_selected = offset + row == selected;
        let marker = if is_selected { ">" } else { " " };
        draw_line_at_with_fg(
            out,
            (divider_row + 1 + row) as u16,
            &format!("{marker} {}", choices[idx].label),
            width,
            if is_selected { Color::Green } else { Color::White },
        )?;
    }

    let cursor_col = (display_width("> ") + display_width(input)).min(width.saturating_sub(1));
    execute!(out, cursor::MoveTo(cursor_col as u16, input_row as u16), cursor::Show)?;
    out.flush()?;
    Ok(())
}

fn render_prompt_line(input: &str, width: usize) -> String {
    let prefix = "> ";
    let available = width.saturating_sub(display_width(prefix));
    clip_line_display(&format!("{prefix}{}", tail_display(input, available)), width)
}

// 입력이 넘치면 끝부분만 보인다.
fn tail_display(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let mut tail_rev = String::new();
    let mut used = 0usize;
    for ch in text.chars().rev() {
        let cw = char_display_width(ch);
        if used + cw > max_width {
            break;
        }
        tail_rev.push(ch);
        used += cw;
    }
    tail_rev.chars().rev().collect()
}

fn clip_line_display(line: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(line) <= max_width {
        return line.to_string();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0usize;
    let cap = max_width - 3;

    for ch in line.chars() {
        let cw = char_display_width(ch);
        if used + cw > cap {
            break;
        }
        out.push(ch);
        used += cw;
    }

    out.push_str("...");
    out
}

fn pad_line_display(line: &str, width: usize) -> String {
    let mut out = line.to_string();
    let used = display_width(line);
    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

fn clear_line_at(out: &mut io::Stderr, row: u16) -> Result<()> {
    execute!(out, cursor::MoveTo(0, row), terminal::Clear(ClearType::CurrentLine))?;
    Ok(())
}

// 배경색이 있는 패널 라인 (입력 영역용).
fn draw_panel_line_at(out: &mut io::Stderr, row: u16, text: &str, width: usize) -> Result<()> {
    execute!(
        out,
        cursor::MoveTo(0, row),
        SetBackgroundColor(Color::DarkGrey),
        SetForegroundColor(Color::White),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    write!(out, "{}", pad_line_display(&clip_line_display(text, width), width))?;
    execute!(out, ResetColor)?;
    Ok(())
}

fn draw_line_at_with_fg(
    out: &mut io::Stderr,
    row: u16,
    text: &str,
    width: usize,
    fg: Color,
) -> Result<()> {
    execute!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine),
        SetForegroundColor(fg)
    )?;
    write!(out, "{}", pad_line_display(&clip_line_display(text, width), width))?;
    execute!(out, ResetColor)?;
    Ok(())
}

/// 현재 터미널에서 선택 패널이 차지하는 하단 행 범위.
fn panel_rows(choice_count: usize) -> (usize, usize) {
    let (_, h) = terminal::size().unwrap_or((120, 40));
    panel_bounds(h as usize, choice_count)
}

/// (시작 행, 전체 행 수). 후보가 없어도 안내 한 줄 자리는 남긴다.
fn panel_bounds(total_rows: usize, choice_count: usize) -> (usize, usize) {
    let height = PANEL_BASE_HEIGHT + choice_count.min(MAX_VISIBLE_CHOICES).max(1);
    (total_rows.saturating_sub(height), total_rows)
}

// 패널 행만 지우고 커서를 패널 시작 위치로 돌려 이후 출력이 이어지게 한다.
fn clear_panel(out: &mut io::Stderr, choice_count: usize) -> Result<()> {
    let (panel_top, total_rows) = panel_rows(choice_count);
    for row in panel_top..total_rows {
        clear_line_at(out, row as u16)?;
    }
    execute!(out, cursor::MoveTo(0, panel_top as u16), ResetColor, cursor::Show)?;
    out.flush()?;
    Ok(())
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

struct InputGuard;

impl InputGuard {
    fn enter(out: &mut io::Stderr) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut out = io::stderr();
        let _ = execute!(out, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::domain::choice::{build_choices, fuzzy_match};
    use crate::domain::framework::{BuildOutput, DevCommand, FrameworkDescriptor, WatchCommands};

    fn choices() -> Vec<FrameworkChoice> {
        let descriptor = |id: &str, name: &str, command: &str| FrameworkDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            dev: DevCommand {
                commands: vec![command.to_string()],
                port: 3000,
            },
            build: BuildOutput {
                directory: "dist".into(),
            },
            static_assets_directory: None,
            env: Default::default(),
            watch: WatchCommands::default(),
        };
        build_choices(&[
            descriptor("gatsby", "Gatsby", "npm run develop"),
            descriptor("vite", "Vite", "npm run dev"),
        ])
    }

    fn pick(typed: &str) -> (Result<FrameworkChoice>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = choose_from_list("Pick one", &choices(), fuzzy_match, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn lists_choices_with_numbers() {
        let (result, printed) = pick("2\n");
        assert_eq!(result.unwrap().descriptor.id, "vite");
        assert!(printed.contains("? Pick one"));
        assert!(printed.contains("  1) [Gatsby] npm run develop"));
        assert!(printed.contains("  2) [Vite] npm run dev"));
    }

    #[test]
    fn text_selects_first_filter_match() {
        let (result, _) = pick("vite\n");
        assert_eq!(result.unwrap().descriptor.id, "vite");
    }

    #[test]
    fn empty_line_selects_first_choice() {
        let (result, _) = pick("\n");
        assert_eq!(result.unwrap().descriptor.id, "gatsby");
    }

    #[test]
    fn out_of_range_and_unmatched_input_fail() {
        assert!(pick("3\n").0.is_err());
        assert!(pick("0\n").0.is_err());
        assert!(pick("hugo\n").0.is_err());
        assert!(pick("").0.is_err());
    }

    #[test]
    fn clip_keeps_width_budget() {
        assert_eq!(clip_line_display("abcdefgh", 6), "abc...");
        assert_eq!(pad_line_display("ab", 4), "ab  ");
        assert_eq!(tail_display("abcdef", 3), "def");
    }

    #[test]
    fn panel_occupies_only_bottom_rows() {
        assert_eq!(panel_bounds(40, 2), (35, 40));
        assert_eq!(panel_bounds(40, 0), (36, 40));
        assert_eq!(panel_bounds(40, 25), (27, 40));
        assert_eq!(panel_bounds(5, 10), (0, 5));
    }
}
