use crate::config::AppConfig;
use crate::plotting;
use crate::report;
use anyhow::{Context, Result};
use ecovision_core::{
    chat::{ChatSession, CompletionClient, OpenAiClient, API_KEY_ENV},
    dashboard::{DashboardBuilder, DashboardSnapshot, FamilyPanel},
    export::write_export,
    overview,
};
use ecovision_schemas::{
    chat::Role,
    city::City,
    record::MetricRecord,
    selection::{Category, Window},
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolved dashboard request after command line and config defaults are merged.
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub city: City,
    pub category: Category,
    pub window: Window,
    pub export: bool,
    pub output_dir: PathBuf,
    pub fields: Option<Vec<String>>,
    pub charts: bool,
    pub table: bool,
    pub json: bool,
}

/// Generates, prints, charts and optionally exports one dashboard snapshot.
pub fn run_dashboard(request: &DashboardRequest) -> Result<()> {
    if let Some(fields) = &request.fields {
        plotting::validate_fields(&request.category.families(), fields)?;
    }

    let dashboard = DashboardBuilder::new()
        .with_city(request.city.clone())
        .with_category(request.category)
        .with_window(request.window)
        .build()?;
    let snapshot = dashboard.run(&mut rand::thread_rng());

    if request.json {
        println!("{}", snapshot.to_json()?);
    } else {
        print_dashboard(&snapshot, request)?;
    }

    if request.export {
        let path = request.output_dir.join(snapshot.export_file_name());
        let payload = snapshot.export_payload()?;
        write_export(&path, &payload)?;
        info!(path = %path.display(), bytes = payload.len(), "exported dashboard data");
        if !request.json {
            println!("\nExported data to '{}'", path.display());
        }
    }

    if !snapshot.is_safe() {
        warn!(city = %snapshot.city, "one or more thresholds breached");
    }
    Ok(())
}

fn print_dashboard(snapshot: &DashboardSnapshot, request: &DashboardRequest) -> Result<()> {
    println!("🌱 Environmental Monitoring Dashboard");
    println!(
        "{} Monitoring: {}, last {} hours",
        snapshot.category,
        snapshot.city,
        snapshot.window.hours()
    );

    show_panel(&snapshot.air, request)?;
    show_panel(&snapshot.water, request)?;
    show_panel(&snapshot.soil, request)?;
    show_panel(&snapshot.noise, request)?;
    Ok(())
}

fn show_panel<R: MetricRecord>(panel: &Option<FamilyPanel<R>>, request: &DashboardRequest) -> Result<()> {
    let Some(panel) = panel else {
        return Ok(());
    };
    print!("{}", report::render_panel(panel, request.table));

    if request.charts {
        let fields = plotting::chart_fields(R::FAMILY, request.fields.as_deref());
        if fields.is_empty() {
            println!("{}", plotting::EMPTY_SELECTION);
        } else if let Some(path) = plotting::render_chart(&request.output_dir, &panel.series, &fields)? {
            println!("Chart saved to '{}'", path.display());
        }
    }
    Ok(())
}

/// Prints the comparisons and, unless `chart_dir` is `None`, saves a bar chart
/// of each next to the dashboard charts.
pub fn run_overview(chart_dir: Option<&Path>) -> Result<()> {
    println!("🌎 EcoVision - Environmental Conservation Overview");
    for comparison in overview::all_comparisons() {
        print!("{}", report::render_comparison(&comparison));
        if let Some(dir) = chart_dir {
            let path = plotting::render_comparison_chart(dir, &comparison)?;
            println!("Chart saved to '{}'", path.display());
        }
    }
    Ok(())
}

/// Runs the assistant: one question when `ask` is given, otherwise an
/// interactive session on stdin.
pub fn run_chat(config: &AppConfig, ask: Option<&str>) -> Result<()> {
    let client = OpenAiClient::from_env(config.chat.clone()).context("Failed to build chat client")?;
    if !client.has_credential() {
        warn!("{} is not set; the assistant will not be able to answer", API_KEY_ENV);
    }
    let mut session = ChatSession::new(config.chat.system_prompt.as_str());

    match ask {
        Some(question) => {
            if let Some(reply) = session.submit(&client, question) {
                println!("{}", reply.content);
            }
            Ok(())
        }
        None => {
            println!("🌿 AI Environmental Chatbot (type /history or /quit)");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            converse(&client, &mut session, stdin.lock(), stdout.lock())
        }
    }
}

/// Reads one message per line until `/quit` or end of input.
pub fn converse<C, I, O>(client: &C, session: &mut ChatSession, input: I, mut output: O) -> Result<()>
where
    C: CompletionClient + ?Sized,
    I: BufRead,
    O: Write,
{
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        match line.trim() {
            "/quit" => break,
            "/history" => {
                for turn in session.transcript() {
                    let speaker = match turn.role {
                        Role::User => "you",
                        Role::Assistant => "assistant",
                        Role::System => "system",
                    };
                    writeln!(output, "[{}] {}", speaker, turn.content)?;
                }
            }
            text => {
                if let Some(reply) = session.submit(client, text) {
                    writeln!(output, "{}", reply.content)?;
                }
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

pub fn default_output_dir(config: &AppConfig, requested: Option<&Path>) -> PathBuf {
    requested
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecovision_core::chat::FALLBACK_REPLY;
    use ecovision_core::error::ChatError;
    use ecovision_schemas::chat::ChatTurn;
    use ecovision_schemas::selection::Family;
    use std::io::Cursor;

    struct Echo;

    impl CompletionClient for Echo {
        fn complete(&self, messages: &[ChatTurn]) -> Result<String, ChatError> {
            Ok(format!("echo: {}", messages[messages.len() - 1].content))
        }
    }

    struct Down;

    impl CompletionClient for Down {
        fn complete(&self, _messages: &[ChatTurn]) -> Result<String, ChatError> {
            Err(ChatError::EmptyReply)
        }
    }

    fn transcript_of<C: CompletionClient>(client: &C, input: &str) -> (ChatSession, String) {
        let mut session = ChatSession::new("prompt");
        let mut output = Vec::new();
        converse(client, &mut session, Cursor::new(input), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn repl_answers_and_stops_at_quit() {
        let (session, output) = transcript_of(&Echo, "hello\n\n/quit\nignored\n");
        assert_eq!(session.transcript().len(), 2);
        assert!(output.contains("echo: hello"));
        assert!(!output.contains("ignored"));
    }

    #[test]
    fn history_lists_turns() {
        let (_, output) = transcript_of(&Echo, "save water\n/history\n");
        assert!(output.contains("[you] save water"));
        assert!(output.contains("[assistant] echo: save water"));
    }

    #[test]
    fn upstream_failure_keeps_the_repl_alive() {
        let (session, output) = transcript_of(&Down, "one\ntwo\n");
        assert_eq!(session.transcript().len(), 4);
        assert_eq!(output.matches(FALLBACK_REPLY).count(), 2);
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let request = DashboardRequest {
            city: City::Mumbai,
            category: Category::Single(Family::Soil),
            window: Window::TwoDays,
            export: true,
            output_dir: dir.path().to_path_buf(),
            fields: None,
            charts: false,
            table: false,
            json: true,
        };
        run_dashboard(&request).unwrap();

        let written = std::fs::read_to_string(dir.path().join("Mumbai_soil_last_48h.csv")).unwrap();
        assert_eq!(written.lines().count(), 49);
        assert!(written.starts_with("timestamp,ph,heavy_metals_ppm"));
    }

    #[test]
    fn unknown_chart_field_fails_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let request = DashboardRequest {
            city: City::Delhi,
            category: Category::Single(Family::Air),
            window: Window::Day,
            export: true,
            output_dir: dir.path().to_path_buf(),
            fields: Some(vec!["decibels".to_string()]),
            charts: true,
            table: false,
            json: false,
        };
        assert!(run_dashboard(&request).is_err());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
