//! Readline REPL for Practicum.
//!
//! Renders the trainer controller's snapshot as colored terminal output and
//! translates slash commands and chat lines into controller intents.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::{Color, Colorize};
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use practicum_application::{TrainerController, TrainerEvent, TrainerIntent, TrainerSnapshot};
use practicum_core::AppConfig;
use practicum_core::backend::CounselingBackend;
use practicum_core::persona::{ClientProfile, PersonaCatalog, StaticCatalog};
use practicum_core::session::{Message, MessageRole};
use practicum_interaction::HttpBackend;

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/help".to_string(),
                "/patients".to_string(),
                "/refresh".to_string(),
                "/page".to_string(),
                "/next".to_string(),
                "/prev".to_string(),
                "/select".to_string(),
                "/review".to_string(),
                "/reset".to_string(),
                "/profile".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", format!("配置加载失败，使用默认配置: {err}").yellow());
            AppConfig::default()
        }
    };

    let backend = Arc::new(HttpBackend::from_config(&config)?);
    let catalog: Arc<dyn PersonaCatalog> = if config.offline {
        Arc::new(StaticCatalog::new())
    } else {
        backend.clone()
    };
    let backend: Arc<dyn CounselingBackend> = backend;
    let controller = Arc::new(TrainerController::new(backend, catalog, config.page_size));

    println!("{}", "=== 心理咨询训练系统 ===".bright_magenta().bold());
    println!(
        "{}",
        "输入 /patients 查看来访者档案，/select <序号> 开始咨询，/help 查看全部命令，quit 退出。"
            .bright_black()
    );
    println!();

    controller.dispatch(TrainerIntent::RefreshRoster).await;
    render_roster(&controller.snapshot().await);

    let helper = CliHelper::new();
    let mut rl: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(helper));

    loop {
        let prompt = {
            let snapshot = controller.snapshot().await;
            format!("[{}] >> ", format_time(snapshot.elapsed_secs))
        };
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "再见！".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed.starts_with('/') {
                    if let Some(intent) = parse_command(trimmed, &controller).await {
                        let event = controller.dispatch(intent).await;
                        render_event(&event, &controller).await;
                    }
                } else {
                    println!("{}", format!("> {}", trimmed).green());
                    if controller.snapshot().await.has_session {
                        println!("{}", "（对方正在输入...）".bright_black());
                    }
                    let event = controller
                        .dispatch(TrainerIntent::SendMessage(trimmed.to_string()))
                        .await;
                    render_event(&event, &controller).await;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "已按下 CTRL-C，输入 quit 退出。".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "已按下 CTRL-D，退出中...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("读取输入失败: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

/// Parses a slash command into an intent.
///
/// Commands that render directly (help, roster, profile) and malformed
/// arguments report to the terminal and return `None`.
async fn parse_command(line: &str, controller: &TrainerController) -> Option<TrainerIntent> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let argument = parts.next();

    match command {
        "/help" => {
            print_help();
            None
        }
        "/patients" => {
            render_roster(&controller.snapshot().await);
            None
        }
        "/refresh" => Some(TrainerIntent::RefreshRoster),
        "/page" => match argument.and_then(|arg| arg.parse().ok()) {
            Some(page) => Some(TrainerIntent::ChangePage(page)),
            None => {
                println!("{}", "用法: /page <页码>".yellow());
                None
            }
        },
        "/next" => {
            let roster = controller.snapshot().await.roster;
            Some(TrainerIntent::ChangePage(roster.page.saturating_add(1)))
        }
        "/prev" => {
            let roster = controller.snapshot().await.roster;
            Some(TrainerIntent::ChangePage(roster.page.saturating_sub(1)))
        }
        "/select" => {
            let Some(position) = argument.and_then(|arg| arg.parse::<usize>().ok()) else {
                println!("{}", "用法: /select <序号>".yellow());
                return None;
            };
            match controller.persona_at(position).await {
                Some(persona) => Some(TrainerIntent::SelectPersona(persona)),
                None => {
                    println!("{}", "该序号不在当前页上".yellow());
                    None
                }
            }
        }
        "/review" => Some(TrainerIntent::ToggleReviewMode),
        "/reset" => Some(TrainerIntent::ResetSession),
        "/profile" => {
            match controller.snapshot().await.profile {
                Some(profile) => render_profile(&profile),
                None => println!("{}", "尚未选择来访者".yellow()),
            }
            None
        }
        _ => {
            println!("{}", "未知命令，输入 /help 查看可用命令".bright_black());
            None
        }
    }
}

fn print_help() {
    println!("{}", "可用命令:".bright_magenta());
    for (cmd, desc) in [
        ("/patients", "显示当前来访者档案列表"),
        ("/refresh", "重新加载第一页档案"),
        ("/page <n>", "跳转到第 n 页"),
        ("/next, /prev", "翻页"),
        ("/select <序号>", "选择当前页上的来访者"),
        ("/review", "切换疗程记忆（回顾之前疗程内容）"),
        ("/reset", "重置会话计时"),
        ("/profile", "查看来访者档案详情"),
        ("quit", "退出"),
    ] {
        println!("  {:<16} {}", cmd.bright_cyan(), desc.bright_black());
    }
}

async fn render_event(event: &TrainerEvent, controller: &TrainerController) {
    match event {
        TrainerEvent::PersonaSelected { resumed } => {
            let snapshot = controller.snapshot().await;
            render_selection(&snapshot, *resumed);
        }
        TrainerEvent::Appended(messages) => {
            let snapshot = controller.snapshot().await;
            // Counselor lines were already echoed at the prompt
            for message in messages.iter().filter(|m| m.role != MessageRole::Counselor) {
                render_message(message, &snapshot);
            }
        }
        TrainerEvent::SessionMissing => {
            println!("{}", "请先选择来访者档案，再开始对话（/select <序号>）".yellow());
        }
        TrainerEvent::Busy => {
            println!("{}", "上一条回复还未返回，请稍候再发送".yellow());
        }
        TrainerEvent::ReviewMode(enabled) => {
            if *enabled {
                println!("{}", "疗程记忆已开启：来访者会记得之前的咨询内容".bright_blue());
            } else {
                println!("{}", "疗程记忆已关闭：专注于当前症状和感受".bright_blue());
            }
        }
        TrainerEvent::SessionReset => {
            println!("{}", "会话计时已重置".bright_black());
        }
        TrainerEvent::RosterUpdated => {
            render_roster(&controller.snapshot().await);
        }
        TrainerEvent::NoOp => {}
    }
}

fn render_selection(snapshot: &TrainerSnapshot, resumed: bool) {
    let Some(persona) = &snapshot.persona else {
        return;
    };

    let title = if persona.case_title.is_empty() {
        persona.name.as_str()
    } else {
        persona.case_title.as_str()
    };
    println!();
    println!(
        "{}",
        format!(
            "—— {} · {} · 第 {} 次咨询 ——",
            title, persona.difficulty, snapshot.session_counter
        )
        .bright_magenta()
    );
    if resumed {
        println!("{}", "已恢复之前的对话记录".bright_black());
    }
    if !snapshot.has_session {
        println!(
            "{}",
            "会话创建失败，请稍后重新选择该来访者".yellow()
        );
    }
    for message in &snapshot.messages {
        render_message(message, snapshot);
    }
}

fn render_message(message: &Message, snapshot: &TrainerSnapshot) {
    match message.role {
        MessageRole::System => {
            println!("{}", format!("· {}", message.content).bright_black());
        }
        MessageRole::Counselor => {
            println!("{}", format!("> {}", message.content).green());
        }
        MessageRole::Client => {
            let name = snapshot
                .profile
                .as_ref()
                .map(|p| p.name.as_str())
                .unwrap_or("来访者");
            print!(
                "{} {}",
                format!("[{}]", name).bright_magenta(),
                message.content.bright_blue()
            );
            if let Some(emotion) = &message.emotion {
                print!(
                    " {}",
                    format!("(情绪: {})", emotion).color(emotion_color(emotion))
                );
            }
            if let Some(complaint) = &message.complaint {
                print!(" {}", format!("(主诉: {})", complaint).bright_yellow());
            }
            println!(" {}", clock_time(&message.timestamp).bright_black());
        }
    }
}

fn render_roster(snapshot: &TrainerSnapshot) {
    let roster = &snapshot.roster;

    println!();
    println!(
        "{}",
        format!(
            "来访者档案 · 共 {} 人 · 第 {}/{} 页",
            roster.total, roster.page, roster.total_pages
        )
        .bright_magenta()
    );

    if roster.personas.is_empty() {
        println!("{}", "暂无可用来访者档案（/refresh 重试）".bright_black());
        return;
    }

    for (index, persona) in roster.personas.iter().enumerate() {
        let title = if persona.case_title.is_empty() {
            persona.name.clone()
        } else {
            persona.case_title.clone()
        };
        println!(
            "  {} {} {}",
            format!("{}.", index + 1).bright_cyan(),
            title.bold(),
            format!("({})", persona.difficulty).color(difficulty_color(&persona.difficulty))
        );
        println!(
            "     {}",
            format!(
                "{}岁 · {} · {}",
                persona.parsed_age(),
                persona.gender,
                persona.occupation
            )
            .bright_black()
        );
        if !persona.symptoms.is_empty() {
            println!("     {}", persona.symptoms.join(" / ").red());
        }
    }

    let window: Vec<String> = practicum_application::page_window(roster.page, roster.total_pages)
        .into_iter()
        .map(|page| {
            if page == roster.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    println!("  {}", format!("页: {}", window.join(" ")).bright_black());
}

fn render_profile(profile: &ClientProfile) {
    println!();
    println!("{}", format!("—— {} 的档案 ——", profile.name).bright_magenta());
    println!(
        "  {}",
        format!("{}岁 · {} · {}", profile.age, profile.gender, profile.occupation).bright_black()
    );
    println!("  {} {}", "背景:".bright_cyan(), profile.background);
    println!("  {} {}", "性格特点:".bright_cyan(), profile.personality);
    println!("  {} {}", "主要症状:".bright_cyan(), profile.symptoms.join(" / ").red());
    if !profile.previous_sessions.is_empty() {
        println!("  {}", "历史疗程:".bright_cyan());
        for session in &profile.previous_sessions {
            println!(
                "    {}",
                format!("第 {} 次 ({}) {}", session.session, session.date, session.summary)
                    .bright_black()
            );
        }
    }
}

/// Formats elapsed seconds as MM:SS.
fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Extracts a wall-clock display form from an RFC 3339 timestamp.
fn clock_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn emotion_color(emotion: &str) -> Color {
    match emotion {
        "焦虑" => Color::Yellow,
        "紧张" => Color::Red,
        "担忧" => Color::BrightYellow,
        "疲惫" => Color::BrightBlack,
        "低落" => Color::Blue,
        "困惑" => Color::Magenta,
        "回忆" => Color::BrightBlue,
        "尝试" => Color::Green,
        "思考" => Color::Cyan,
        "平静" => Color::BrightGreen,
        _ => Color::BrightBlack,
    }
}

fn difficulty_color(difficulty: &str) -> Color {
    match difficulty {
        "初级" => Color::Green,
        "中级" => Color::Yellow,
        "高级" => Color::Red,
        _ => Color::BrightBlack,
    }
}
