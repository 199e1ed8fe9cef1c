use std::time::Instant;

use kartuli_drill::{
    Catalog, Category, DEFAULT_ADVANCE_DELAY, Drill, Response, SchedulerConfig, Step,
};

fn setup_logging() -> Result<(), Box<dyn std::error::Error>> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Info)
        .level_for("kartuli_drill", log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging()?;

    let catalog = Catalog::georgian();
    let config = SchedulerConfig {
        window_capacity: 5,
        repeat_spacing: 3,
        ..Default::default()
    };
    let mut drill = Drill::start(&catalog, Category::Letters, config, Some(2024))?;
    let mut now = Instant::now();

    // A scripted learner: every fourth answer is a miss.
    let mut turn = 0;
    loop {
        let question = match drill.next_question()? {
            Step::Question(question) => question.clone(),
            Step::Finished(stats) => {
                println!(
                    "Done: {} of {} mastered, {} answers, accuracy {}%",
                    stats.mastered, stats.total, stats.answered, stats.accuracy_percent
                );
                break;
            }
        };
        println!("{} {}", question.instruction, question.prompt);
        if let Response::Choice { options } = &question.response {
            println!("  options: {}", options.join(" | "));
        }

        turn += 1;
        let answer = if turn % 4 == 0 {
            "?".to_owned()
        } else {
            question.expected.clone()
        };
        let feedback = drill.submit(&answer, now)?;
        if feedback.is_correct {
            now += DEFAULT_ADVANCE_DELAY;
            if drill.tick(now) {
                println!("  correct");
            }
        } else {
            println!("  wrong, expected {}", feedback.expected);
        }

        let stats = drill.stats();
        println!(
            "  progress {}% ({}/{} mastered)",
            stats.progress_percent, stats.mastered, stats.total
        );
    }
    Ok(())
}
