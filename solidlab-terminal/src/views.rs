/// Line-oriented pages: home, progress, learning and the not-found screens
///
/// These write plain text to any `Write` and read answers from any `BufRead`,
/// so they run the same against a terminal or an in-memory buffer.
use std::io::{self, BufRead, Write};

use solidlab_core::catalog;
use solidlab_core::practice::PracticeSession;
use solidlab_core::shape::Solid;
use solidlab_core::store::{LearningProgress, ProgressStore, StorageBackend, MAX_MASTERY};
use solidlab_core::{Route, ShapeKind};
use tracing::warn;

const MASTERY_BAR_WIDTH: usize = 20;
const RECENT_RECORDS: usize = 5;

/// What the user picked on the home menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Go(Route),
    Quit,
    Invalid,
}

/// Parse a home menu line.
///
/// Accepts a catalog number, a shape name, `learn <shape>`, `p`/`progress`,
/// `q`/`quit`, or a route path starting with `/`.
pub fn parse_menu_choice(line: &str) -> MenuChoice {
    let line = line.trim();
    if line.is_empty() || line == "q" || line == "quit" {
        return MenuChoice::Quit;
    }
    if line == "p" || line == "progress" {
        return MenuChoice::Go(Route::Progress);
    }
    if line.starts_with('/') {
        return MenuChoice::Go(Route::parse(line));
    }
    if let Ok(number) = line.parse::<usize>() {
        return match number.checked_sub(1).and_then(|i| ShapeKind::ALL.get(i)) {
            Some(kind) => MenuChoice::Go(Route::Viewer(*kind)),
            None => MenuChoice::Invalid,
        };
    }
    if let Some(name) = line.strip_prefix("learn ") {
        return match name.trim().parse() {
            Ok(kind) => MenuChoice::Go(Route::Learn(kind)),
            Err(_) => MenuChoice::Invalid,
        };
    }
    match line.parse() {
        Ok(kind) => MenuChoice::Go(Route::Viewer(kind)),
        Err(_) => MenuChoice::Invalid,
    }
}

fn mastery_bar(mastery: u32) -> String {
    let filled = (mastery.min(MAX_MASTERY) as usize * MASTERY_BAR_WIDTH) / MAX_MASTERY as usize;
    format!(
        "[{}{}] {mastery:>3}%",
        "#".repeat(filled),
        "-".repeat(MASTERY_BAR_WIDTH - filled)
    )
}

pub fn render_home<W: Write, B: StorageBackend>(
    out: &mut W,
    store: &ProgressStore<B>,
) -> io::Result<()> {
    let progress = store.learning_progress();
    let mastery_of = |kind: ShapeKind| {
        progress
            .iter()
            .find(|p| p.kind == kind)
            .map_or(0, |p| p.mastery_level)
    };

    writeln!(out, "SolidLab - explore solid geometry")?;
    writeln!(out)?;
    for category in catalog::categories() {
        writeln!(out, "{} - {}", category.name, category.description)?;
        for kind in category.shapes {
            let number = ShapeKind::ALL.iter().position(|k| k == kind).unwrap_or_default() + 1;
            let config = catalog::config(*kind);
            writeln!(
                out,
                "  {number}. {:<12} {}  {}",
                config.name,
                mastery_bar(mastery_of(*kind)),
                config.description
            )?;
            writeln!(
                out,
                "     {}    {}",
                config.formula.surface_area, config.formula.volume
            )?;
        }
        writeln!(out)?;
    }

    let stats = store.learning_stats();
    writeln!(
        out,
        "Visits: {}  Average mastery: {}%  Practice accuracy: {}%",
        stats.total_visits, stats.avg_mastery, stats.accuracy
    )?;
    writeln!(out, "Last viewed: {}", catalog::config(store.current_geometry()).name)?;
    writeln!(out)?;
    writeln!(
        out,
        "Open a shape by number or name, 'learn <shape>' to practice, 'p' for progress, 'q' to quit."
    )?;
    Ok(())
}

fn render_progress_row<W: Write>(out: &mut W, progress: &LearningProgress) -> io::Result<()> {
    writeln!(
        out,
        "  {:<12} {:>6} {}  {:>5}  {}",
        catalog::config(progress.kind).name,
        progress.visit_count,
        mastery_bar(progress.mastery_level),
        progress.practice_score,
        progress.last_visit.format("%Y-%m-%d %H:%M")
    )
}

pub fn render_progress<W: Write, B: StorageBackend>(
    out: &mut W,
    store: &ProgressStore<B>,
) -> io::Result<()> {
    let stats = store.learning_stats();
    writeln!(out, "Learning progress")?;
    writeln!(out)?;
    writeln!(out, "  Total visits:      {}", stats.total_visits)?;
    writeln!(out, "  Average mastery:   {}%", stats.avg_mastery)?;
    writeln!(
        out,
        "  Practice:          {} answered, {} correct ({}%)",
        stats.total_practices, stats.correct_practices, stats.accuracy
    )?;
    writeln!(out)?;

    let progress = store.learning_progress();
    if progress.is_empty() {
        writeln!(out, "No shapes visited yet.")?;
    } else {
        writeln!(
            out,
            "  {:<12} {:>6} {:<28} {:>5}  {}",
            "Shape", "Visits", "Mastery", "Score", "Last visit"
        )?;
        for entry in &progress {
            render_progress_row(out, entry)?;
        }
    }

    let records = store.practice_records();
    if !records.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent practice")?;
        for record in records.iter().rev().take(RECENT_RECORDS) {
            writeln!(
                out,
                "  {} {:<12} {}  answer {:.2}, yours {:.2}",
                if record.is_correct { "✓" } else { "✗" },
                catalog::config(record.geometry_type).name,
                record.question,
                record.answer,
                record.user_answer
            )?;
        }
    }
    Ok(())
}

/// Screen for `/geometry/:type` or `/learn/:type` with an unknown type
pub fn render_shape_not_found<W: Write>(out: &mut W, path: &str) -> io::Result<()> {
    writeln!(out, "Shape not found: {path}")?;
    let names: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.as_str()).collect();
    writeln!(out, "Available shapes: {}", names.join(", "))
}

pub fn render_not_found<W: Write>(out: &mut W, path: &str) -> io::Result<()> {
    writeln!(out, "Page not found: {path}")
}

fn render_lesson<W: Write>(out: &mut W, kind: ShapeKind) -> io::Result<()> {
    let config = catalog::config(kind);
    writeln!(out, "{}", config.name)?;
    writeln!(out, "{}", config.description)?;
    writeln!(out)?;
    writeln!(out, "Surface area: {}", config.formula.surface_area)?;
    writeln!(out, "Volume:       {}", config.formula.volume)?;

    if let Ok(solid) = Solid::from_params(kind, &config.default_params) {
        let properties = solid.properties();
        writeln!(
            out,
            "With the default size: surface area {:.2}, volume {:.2}",
            properties.surface_area, properties.volume
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Properties")?;
    for property in config.properties {
        writeln!(out, "  - {property}")?;
    }
    writeln!(out, "Tips")?;
    for tip in config.learning_tips {
        writeln!(out, "  - {tip}")?;
    }
    writeln!(out)
}

/// Lesson text followed by a practice loop.
///
/// Reads one line per prompt: a number answers, `n` moves on, `q` or end of
/// input leaves. Answers are stored through `store`; a failed write is logged
/// and practice continues. Returns the session score.
pub fn run_learning<R, W, B>(
    input: &mut R,
    out: &mut W,
    store: &mut ProgressStore<B>,
    kind: ShapeKind,
) -> io::Result<u32>
where
    R: BufRead,
    W: Write,
    B: StorageBackend,
{
    render_lesson(out, kind)?;
    let mut session = PracticeSession::new(kind);
    let mut show_question = true;

    loop {
        if show_question {
            let question = session.question();
            writeln!(out, "Question {}: {}", session.number(), question.prompt)?;
            show_question = false;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "q" | "quit" => break,
            "n" | "next" => {
                session.next_question();
                show_question = true;
            }
            answer => match session.submit(answer) {
                Some(submission) => {
                    let question = session.question();
                    if submission.correct {
                        writeln!(out, "Correct! Score: {}", session.score())?;
                    } else {
                        writeln!(
                            out,
                            "Not quite. The answer is {:.2} ({}).",
                            question.answer, question.formula
                        )?;
                    }
                    if let Err(e) = store.add_practice_record(submission.record) {
                        warn!(shape = %kind, error = %e, "failed to store practice record");
                    }
                    writeln!(out, "Press 'n' for the next question or 'q' to finish.")?;
                }
                None if session.answered() => {
                    writeln!(out, "Already answered. Press 'n' for the next question.")?;
                }
                None => writeln!(out, "Enter a number to submit.")?,
            },
        }
    }

    writeln!(out, "Practice finished with score {}.", session.score())?;
    Ok(session.score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidlab_core::MemoryBackend;
    use std::io::Cursor;

    fn store() -> ProgressStore<MemoryBackend> {
        ProgressStore::new(MemoryBackend::new())
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(parse_menu_choice("1"), MenuChoice::Go(Route::Viewer(ShapeKind::Cube)));
        assert_eq!(parse_menu_choice("torus"), MenuChoice::Go(Route::Viewer(ShapeKind::Torus)));
        assert_eq!(
            parse_menu_choice("learn cone"),
            MenuChoice::Go(Route::Learn(ShapeKind::Cone))
        );
        assert_eq!(parse_menu_choice("p"), MenuChoice::Go(Route::Progress));
        assert_eq!(
            parse_menu_choice("/geometry/cube"),
            MenuChoice::Go(Route::Viewer(ShapeKind::Cube))
        );
        assert_eq!(parse_menu_choice(" q "), MenuChoice::Quit);
        assert_eq!(parse_menu_choice(""), MenuChoice::Quit);
        assert_eq!(parse_menu_choice("7"), MenuChoice::Invalid);
        assert_eq!(parse_menu_choice("0"), MenuChoice::Invalid);
        assert_eq!(parse_menu_choice("learn prism"), MenuChoice::Invalid);
    }

    #[test]
    fn test_mastery_bar() {
        assert_eq!(mastery_bar(0), format!("[{}]   0%", "-".repeat(20)));
        assert_eq!(mastery_bar(50), format!("[{}{}]  50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(mastery_bar(100), format!("[{}] 100%", "#".repeat(20)));
    }

    #[test]
    fn test_home_lists_every_shape() {
        let mut store = store();
        store.record_visit(ShapeKind::Sphere).unwrap();
        let mut out = Vec::new();
        render_home(&mut out, &store).unwrap();
        let page = text(out);

        for config in catalog::all() {
            assert!(page.contains(config.name));
        }
        assert!(page.contains("Visits: 1"));
        assert!(page.contains("Last viewed: Cube"));
    }

    #[test]
    fn test_progress_page() {
        let mut empty = Vec::new();
        render_progress(&mut empty, &store()).unwrap();
        assert!(text(empty).contains("No shapes visited yet."));

        let mut store = store();
        store.record_visit(ShapeKind::Torus).unwrap();
        store.record_visit(ShapeKind::Torus).unwrap();
        let mut out = Vec::new();
        render_progress(&mut out, &store).unwrap();
        let page = text(out);
        assert!(page.contains("Total visits:      2"));
        assert!(page.contains("Torus"));
        assert!(page.contains("  7%"));
    }

    #[test]
    fn test_learning_session_records_answers() {
        let mut store = store();
        let mut input = Cursor::new("abc\n24\n24\nn\n26\nq\n");
        let mut out = Vec::new();
        let score = run_learning(&mut input, &mut out, &mut store, ShapeKind::Cube).unwrap();
        let page = text(out);

        assert_eq!(score, 1);
        assert!(page.contains("S = 6a²"));
        assert!(page.contains("Enter a number to submit."));
        assert!(page.contains("Correct! Score: 1"));
        assert!(page.contains("Already answered."));
        assert!(page.contains("Question 2:"));
        assert!(page.contains("Not quite. The answer is 27.00"));

        let records = store.practice_records();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_correct);
        assert!(!records[1].is_correct);
        assert_eq!(store.progress_for(ShapeKind::Cube).unwrap().practice_score, 1);
    }

    #[test]
    fn test_learning_ends_at_end_of_input() {
        let mut store = store();
        let mut out = Vec::new();
        let score = run_learning(&mut Cursor::new(""), &mut out, &mut store, ShapeKind::Sphere)
            .unwrap();
        assert_eq!(score, 0);
        assert!(store.practice_records().is_empty());
    }

    #[test]
    fn test_not_found_pages() {
        let mut out = Vec::new();
        render_shape_not_found(&mut out, "/geometry/prism").unwrap();
        render_not_found(&mut out, "/settings").unwrap();
        let page = text(out);
        assert!(page.contains("Shape not found: /geometry/prism"));
        assert!(page.contains("tetrahedron"));
        assert!(page.contains("Page not found: /settings"));
    }
}
