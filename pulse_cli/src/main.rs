use clap::{Parser, Subcommand, ValueEnum};
use pulse_core::session::{format_clock, Session};
use pulse_core::*;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ironpulse")]
#[command(about = "Guided workout tracker with set logging and rest timers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the preset routines (default)
    Routines,

    /// Run a guided workout from a preset routine
    Train {
        /// Routine id (see `routines`)
        routine: String,

        /// Log every target set with the default stepper values and finish
        #[arg(long)]
        auto_complete: bool,
    },

    /// Log a meal
    Meal {
        /// Use a meal preset by name (e.g. "banana")
        #[arg(long, conflicts_with = "name")]
        preset: Option<String>,

        /// Meal name for a custom entry
        #[arg(long, requires = "calories")]
        name: Option<String>,

        #[arg(long)]
        calories: Option<u32>,

        #[arg(long, default_value_t = 0)]
        protein: u32,

        #[arg(long, default_value_t = 0)]
        carbs: u32,

        #[arg(long, default_value_t = 0)]
        fat: u32,

        #[arg(long)]
        fiber: Option<u32>,
    },

    /// Show recent workouts
    History {
        /// Window size in days
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(1..))]
        days: i64,
    },

    /// Show or edit the profile with metabolic estimates and today's intake
    Profile {
        /// Write the default profile if none exists
        #[arg(long)]
        init: bool,

        #[command(flatten)]
        edit: ProfileEdit,
    },

    /// Roll up journaled workouts to CSV
    Rollup {
        /// Clean up processed journals after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(clap::Args)]
struct ProfileEdit {
    /// Body weight in kg
    #[arg(long)]
    weight: Option<f64>,

    /// Height in cm
    #[arg(long)]
    height: Option<f64>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    age: Option<u32>,

    #[arg(long, value_enum)]
    goal: Option<GoalArg>,

    /// Daily calorie target in kcal
    #[arg(long)]
    calorie_target: Option<u32>,

    /// Daily protein target in grams
    #[arg(long)]
    protein_target: Option<u32>,
}

impl ProfileEdit {
    fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.height.is_none()
            && self.age.is_none()
            && self.goal.is_none()
            && self.calorie_target.is_none()
            && self.protein_target.is_none()
    }

    fn apply(&self, profile: &mut UserProfile) -> Result<()> {
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(Error::Other("weight must be positive".into()));
            }
            profile.weight = weight;
        }
        if let Some(height) = self.height {
            if !height.is_finite() || height <= 0.0 {
                return Err(Error::Other("height must be positive".into()));
            }
            profile.height = height;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(goal) = self.goal {
            profile.goal = goal.into();
        }
        if let Some(calories) = self.calorie_target {
            profile.targets.daily_calories = calories;
        }
        if let Some(protein) = self.protein_target {
            profile.targets.daily_protein = protein;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    LoseWeight,
    GainMuscle,
    Maintain,
    Endurance,
}

impl From<GoalArg> for FitnessGoal {
    fn from(goal: GoalArg) -> Self {
        match goal {
            GoalArg::LoseWeight => FitnessGoal::LoseWeight,
            GoalArg::GainMuscle => FitnessGoal::GainMuscle,
            GoalArg::Maintain => FitnessGoal::Maintain,
            GoalArg::Endurance => FitnessGoal::Endurance,
        }
    }
}

fn goal_label(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::LoseWeight => "lose weight",
        FitnessGoal::GainMuscle => "gain muscle",
        FitnessGoal::Maintain => "maintain",
        FitnessGoal::Endurance => "endurance",
    }
}

fn main() -> Result<()> {
    pulse_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Some(Commands::Routines) | None => cmd_routines(),
        Some(Commands::Train {
            routine,
            auto_complete,
        }) => cmd_train(&paths, &config, &routine, auto_complete),
        Some(Commands::Meal {
            preset,
            name,
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }) => {
            let today = today();
            let log = match (preset, name, calories) {
                (Some(preset), _, _) => get_default_catalog().meal(&preset)?.to_log(today),
                (None, Some(meal), Some(calories)) => DietLog {
                    id: uuid::Uuid::new_v4(),
                    date: today,
                    meal,
                    calories,
                    protein,
                    carbs,
                    fat,
                    fiber,
                },
                _ => {
                    return Err(Error::Other(
                        "either --preset or --name with --calories is required".into(),
                    ))
                }
            };
            cmd_meal(&paths, log)
        }
        Some(Commands::History { days }) => cmd_history(&paths, days),
        Some(Commands::Profile { init, edit }) => cmd_profile(&paths, init, &edit),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn load_catalog() -> Result<&'static Catalog> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    Ok(catalog)
}

fn cmd_routines() -> Result<()> {
    let catalog = load_catalog()?;

    for routine in &catalog.routines {
        let groups: Vec<String> = routine.muscle_groups.iter().map(|g| g.to_string()).collect();
        println!();
        println!("  {}  [{}]", routine.name, routine.id);
        println!(
            "  {} · ~{} min · {}",
            routine.difficulty,
            routine.estimated_minutes,
            groups.join(", ")
        );
        for ex in &routine.exercises {
            println!("    {:<24} {} x {}", ex.name, ex.target_sets, ex.target_reps);
        }
    }
    println!();
    Ok(())
}

fn cmd_train(paths: &DataPaths, config: &Config, routine_id: &str, auto_complete: bool) -> Result<()> {
    let catalog = load_catalog()?;
    let routine = catalog.routine(routine_id)?;

    let mut controller = SessionController::new(config.session.clone());
    controller.subscribe(Box::new(render_event));
    controller.start(routine)?;

    let mut input = SetInput::new(&config.stepper);

    let finished = if auto_complete {
        run_auto_complete(&mut controller, &input)?
    } else {
        run_interactive(&mut controller, &mut input, config)?
    };

    let Some(log) = finished else {
        println!("\nSession abandoned - nothing logged.");
        return Ok(());
    };

    let mut sink = JsonlSink::new(&paths.workouts_journal);
    sink.append(&log)?;
    controller.reset()?;

    println!("\n✓ Workout logged!");
    Ok(())
}

/// Log every target set with the stepper defaults, then finish
fn run_auto_complete(
    controller: &mut SessionController<'_>,
    input: &SetInput,
) -> Result<Option<WorkoutLog>> {
    loop {
        let target_sets = controller
            .session()
            .map(|s| s.current_exercise().target_sets)
            .unwrap_or(0);
        for _ in 0..target_sets {
            controller.log_set(input.weight, input.reps)?;
        }
        if !controller.next_exercise()? {
            break;
        }
    }
    controller.finish(today()).map(Some)
}

enum HudCommand {
    Log(Option<(i32, i32)>),
    WeightUp,
    WeightDown,
    RepsUp,
    RepsDown,
    Next,
    Prev,
    Skip,
    Extend,
    Finish,
    Status,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<HudCommand> {
    let mut words = line.split_whitespace();
    let word = words.next()?.to_lowercase();
    let command = match word.as_str() {
        "l" | "log" => {
            let weight = words.next().and_then(|w| w.parse().ok());
            let reps = words.next().and_then(|r| r.parse().ok());
            HudCommand::Log(weight.zip(reps))
        }
        "w+" => HudCommand::WeightUp,
        "w-" => HudCommand::WeightDown,
        "r+" => HudCommand::RepsUp,
        "r-" => HudCommand::RepsDown,
        "n" | "next" => HudCommand::Next,
        "p" | "prev" => HudCommand::Prev,
        "s" | "skip" => HudCommand::Skip,
        "e" | "extend" => HudCommand::Extend,
        "f" | "finish" => HudCommand::Finish,
        "status" => HudCommand::Status,
        "q" | "quit" => HudCommand::Quit,
        "h" | "help" | "?" => HudCommand::Help,
        _ => return None,
    };
    Some(command)
}

/// Drive the session from stdin, ticking once per interval in between.
///
/// Stdin is read on a helper thread and forwarded over a channel; the
/// controller itself is only touched here, so ticks and commands never overlap.
fn run_interactive(
    controller: &mut SessionController<'_>,
    input: &mut SetInput,
    config: &Config,
) -> Result<Option<WorkoutLog>> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    print_help();
    if let Some(session) = controller.session() {
        print_hud(session, input);
    }

    let mut metronome = Metronome::start(config.session.tick_interval(), Instant::now());

    loop {
        let received = rx.recv_timeout(metronome.until_next(Instant::now()));
        if let Some(outcome) = step(controller, input, &mut metronome, received, Instant::now())? {
            return Ok(outcome);
        }
    }
}

/// Apply the ticks due at `now`, then the received line.
///
/// Returns `Some` once the session has ended: the log when finished,
/// `None` inside when abandoned.
fn step(
    controller: &mut SessionController<'_>,
    input: &mut SetInput,
    metronome: &mut Metronome,
    received: std::result::Result<String, RecvTimeoutError>,
    now: Instant,
) -> Result<Option<Option<WorkoutLog>>> {
    for _ in 0..metronome.due_ticks(now) {
        controller.tick();
    }

    let line = match received {
        Ok(line) => line,
        Err(RecvTimeoutError::Timeout) => return Ok(None),
        Err(RecvTimeoutError::Disconnected) => {
            tracing::info!("Input closed before the workout finished");
            controller.abandon()?;
            return Ok(Some(None));
        }
    };

    let Some(command) = parse_command(&line) else {
        if !line.trim().is_empty() {
            eprintln!("Unknown command: {}. Type 'help' for commands.", line.trim());
        }
        return Ok(None);
    };

    match command {
        HudCommand::Log(values) => {
            if let Some((weight, reps)) = values {
                input.weight = weight;
                input.reps = reps;
            }
            controller.log_set(input.weight, input.reps)?;
        }
        HudCommand::WeightUp => input.increase_weight(),
        HudCommand::WeightDown => input.decrease_weight(),
        HudCommand::RepsUp => input.increase_reps(),
        HudCommand::RepsDown => input.decrease_reps(),
        HudCommand::Next => {
            if !controller.next_exercise()? {
                println!("Already on the last exercise.");
            }
        }
        HudCommand::Prev => {
            if !controller.prev_exercise()? {
                println!("Already on the first exercise.");
            }
        }
        HudCommand::Skip => controller.skip_rest()?,
        HudCommand::Extend => controller.extend_rest_default()?,
        HudCommand::Finish => {
            let on_last = controller
                .session()
                .is_some_and(|s| s.is_last_exercise());
            if on_last {
                return controller.finish(today()).map(|log| Some(Some(log)));
            }
            println!("Finish is available on the last exercise.");
        }
        HudCommand::Status => {}
        HudCommand::Quit => {
            controller.abandon()?;
            return Ok(Some(None));
        }
        HudCommand::Help => print_help(),
    }

    if let Some(session) = controller.session() {
        print_hud(session, input);
    }
    Ok(None)
}

fn render_event(event: &HudEvent) {
    match event {
        HudEvent::Started { routine_id } => {
            tracing::debug!("HUD started for {}", routine_id);
        }
        HudEvent::SetLogged {
            reps,
            weight,
            volume,
            ..
        } => {
            println!("  ✓ Set logged: {} kg x {} (volume {} kg)", weight, reps, volume);
        }
        HudEvent::RestEnded { skipped: false } => println!("  ⏱ Rest over - next set!"),
        HudEvent::RestEnded { skipped: true } => println!("  ⏱ Rest skipped"),
        HudEvent::RestExtended { remaining } => {
            println!("  ⏱ Rest extended: {} left", format_clock(u64::from(*remaining)));
        }
        HudEvent::Finished(log) => print_summary(log),
        HudEvent::Ticked { .. }
        | HudEvent::ExerciseChanged { .. }
        | HudEvent::Abandoned
        | HudEvent::Reset => {}
    }
}

fn print_help() {
    println!("─────────────────────────────────────────");
    println!("Commands:");
    println!("  log [kg reps]   log a set (l)");
    println!("  w+ / w-         weight stepper");
    println!("  r+ / r-         reps stepper");
    println!("  next / prev     change exercise (n / p)");
    println!("  skip / extend   skip rest or add time (s / e)");
    println!("  finish          finish on the last exercise (f)");
    println!("  status / quit   show HUD / abandon (q)");
}

fn print_hud(session: &Session<'_>, input: &SetInput) {
    let routine = session.routine();
    let progress = session.current_progress();
    let slots: String = progress
        .slots()
        .iter()
        .map(|done| if *done { "[x]" } else { "[ ]" })
        .collect();

    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {}  ·  {}",
        routine.name.to_uppercase(),
        format_clock(session.elapsed_seconds())
    );
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  Exercise {} of {}: {}",
        progress.index + 1,
        routine.exercises.len(),
        progress.exercise.name
    );
    println!(
        "  Target: {} x {}   {}",
        progress.exercise.target_sets, progress.exercise.target_reps, slots
    );
    println!("  Next set: {} kg x {}", input.weight, input.reps);
    println!("  Volume: {} kg", session.volume());
    if session.is_resting() {
        println!(
            "  Resting: {} (skip / extend)",
            format_clock(u64::from(session.rest_remaining()))
        );
    }
}

fn print_summary(log: &WorkoutLog) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT COMPLETE");
    println!("╰─────────────────────────────────────────╯");
    println!("  {}", log.workout_type);
    println!("  Duration: {} min", log.duration_minutes);
    println!("  Calories: {} kcal", log.calories_burned);
    println!("  Sets: {}", log.sets.unwrap_or(0));
    println!("  Volume: {} kg", log.volume.unwrap_or(0));
}

fn cmd_meal(paths: &DataPaths, log: DietLog) -> Result<()> {
    let mut sink = JsonlSink::new(&paths.meals_journal);
    sink.append(&log)?;

    println!(
        "✓ Meal logged: {} ({} kcal, P {}g / C {}g / F {}g)",
        log.meal, log.calories, log.protein, log.carbs, log.fat
    );
    Ok(())
}

fn cmd_history(paths: &DataPaths, days: i64) -> Result<()> {
    let logs = load_recent_workouts(&paths.workouts_journal, &paths.workouts_csv, days, today())?;

    if logs.is_empty() {
        println!("No workout history in the last {} days.", days);
        return Ok(());
    }

    for log in &logs {
        println!(
            "  {}  {:<18} {:>3} min  {:>4} kcal  {:>3} sets  {:>6} kg",
            log.date,
            log.workout_type,
            log.duration_minutes,
            log.calories_burned,
            log.sets.unwrap_or(0),
            log.volume.unwrap_or(0)
        );
    }

    let summary = WorkoutSummary::from_logs(&logs);
    println!();
    println!(
        "  {} workouts · {} min · {} kcal · {} sets · {} kg",
        summary.workouts, summary.minutes, summary.calories, summary.sets, summary.volume
    );
    Ok(())
}

fn cmd_profile(paths: &DataPaths, init: bool, edit: &ProfileEdit) -> Result<()> {
    let mut profile = UserProfile::load(&paths.profile)?;
    if init && !paths.profile.exists() {
        profile.save(&paths.profile)?;
        println!("✓ Profile created at {}", paths.profile.display());
    }
    if !edit.is_empty() {
        profile = UserProfile::update(&paths.profile, |p| edit.apply(p))?;
        println!("✓ Profile updated");
    }

    let meals: Vec<DietLog> = read_records(&paths.meals_journal)?;
    let totals = NutritionTotals::for_date(&meals, today());

    println!("\n  {} · {} y · {} kg · {} cm", profile.name, profile.age, profile.weight, profile.height);
    println!("  Goal: {}", goal_label(profile.goal));
    println!("  BMR: {} kcal", pulse_core::metrics::bmr(&profile));
    println!("  TDEE: {} kcal", pulse_core::metrics::tdee(&profile));
    println!("  BMI: {:.1}", pulse_core::metrics::bmi(&profile));
    println!();
    println!(
        "  Today: {} / {} kcal ({}%) · protein {} / {} g ({}%)",
        totals.calories,
        profile.targets.daily_calories,
        totals.calorie_progress(&profile),
        totals.protein,
        profile.targets.daily_protein,
        totals.protein_progress(&profile)
    );
    Ok(())
}

fn cmd_rollup(paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.workouts_journal.exists() {
        println!("No workout journal found - nothing to roll up.");
        return Ok(());
    }

    let count = pulse_core::rollup::rollup_workouts(&paths.workouts_journal, &paths.workouts_csv)?;

    println!("✓ Rolled up {} workouts to CSV", count);
    println!("  CSV: {}", paths.workouts_csv.display());

    if cleanup {
        let cleaned = pulse_core::rollup::cleanup_processed(&paths.journal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed journals", cleaned);
        }
    }

    Ok(())
}
