use clap::{Args, Parser, Subcommand, ValueEnum};
use exterior_ballistics::{
    AtmosphericConditions, BallisticInputs, DragFunction, PbrSolution, TrajectorySample, TrajectorySolver,
    TrajectoryTable, WindConditions,
};
use log::info;
use serde::Serialize;
use std::error::Error;

#[derive(Parser)]
#[command(name = "ballistics-cli")]
#[command(version)]
#[command(about = "Small-arms trajectory tables, zero angles and point-blank range", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Zero the rifle and print a trajectory table
    Trajectory {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        conditions: ConditionArgs,

        /// Wind speed (mi/hr)
        #[arg(long, default_value = "0.0")]
        wind_speed: f64,

        /// Wind angle (degrees, 0 = headwind, 90 = from the right)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        wind_angle: f64,

        /// Uphill (+) or downhill (-) shooting angle (degrees)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        shooting_angle: f64,

        /// Print a row every this many yards
        #[arg(short = 'i', long, default_value = "100")]
        interval: usize,

        /// Last yardage to print
        #[arg(long, default_value = "1000")]
        max_range: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the bore angle for a zero
    Zero {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        conditions: ConditionArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the point-blank range for a vital zone
    Pbr {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        conditions: ConditionArgs,

        /// Vital zone diameter (inches)
        #[arg(long, default_value = "6.0")]
        vital_size: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display ballistics information
    Info,
}

#[derive(Args)]
struct LoadArgs {
    /// Muzzle velocity (ft/s)
    #[arg(short = 'v', long)]
    velocity: f64,

    /// Ballistic coefficient
    #[arg(short = 'b', long, default_value = "0.5")]
    bc: f64,

    /// Drag function (g1 through g8)
    #[arg(short = 'd', long, default_value = "g1", value_parser = parse_drag_function)]
    drag_function: DragFunction,

    /// Sight height above the bore (inches)
    #[arg(long, default_value = "1.5")]
    sight_height: f64,

    /// Zero range (yards)
    #[arg(short = 'z', long, default_value = "100.0")]
    zero_range: f64,

    /// Point of impact above the line of sight at the zero range (inches)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    zero_height: f64,
}

#[derive(Args)]
struct ConditionArgs {
    /// Altitude (feet)
    #[arg(long, default_value = "0.0")]
    altitude: f64,

    /// Barometric pressure (inHg)
    #[arg(long, default_value = "29.53")]
    barometer: f64,

    /// Temperature (°F)
    #[arg(long, default_value = "59.0", allow_hyphen_values = true)]
    temperature: f64,

    /// Relative humidity (0.0 - 1.0)
    #[arg(long, default_value = "0.78")]
    humidity: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

fn parse_drag_function(s: &str) -> Result<DragFunction, String> {
    DragFunction::from_str(s).ok_or_else(|| format!("unknown drag function '{}', expected g1 through g8", s))
}

impl LoadArgs {
    fn inputs(&self, shooting_angle: f64) -> BallisticInputs {
        BallisticInputs {
            drag_function: self.drag_function,
            ballistic_coefficient: self.bc,
            muzzle_velocity: self.velocity,
            sight_height: self.sight_height,
            shooting_angle,
            zero_range: self.zero_range,
            zero_height: self.zero_height,
        }
    }
}

impl ConditionArgs {
    fn atmosphere(&self) -> AtmosphericConditions {
        AtmosphericConditions {
            altitude: self.altitude,
            barometer: self.barometer,
            temperature: self.temperature,
            relative_humidity: self.humidity,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrajectoryReport<'a> {
    drag_function: DragFunction,
    ballistic_coefficient: f64,
    muzzle_velocity: f64,
    zero_angle_degrees: f64,
    termination: String,
    samples: Vec<&'a TrajectorySample>,
}

#[derive(Debug, Serialize)]
struct ZeroReport {
    drag_function: DragFunction,
    zero_range: f64,
    zero_angle_degrees: f64,
    zero_angle_moa: f64,
    iterations: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Trajectory {
            load,
            conditions,
            wind_speed,
            wind_angle,
            shooting_angle,
            interval,
            max_range,
            output,
        } => {
            let inputs = load.inputs(shooting_angle);
            let solver = TrajectorySolver::new(inputs, WindConditions::new(wind_speed, wind_angle), conditions.atmosphere());
            let zero = solver.zero()?;
            info!("zero angle {:.6} deg after {} iterations", zero.angle_degrees, zero.iterations);
            let table = solver.solve_with_zero_angle(zero.angle_degrees);
            info!("{} samples, stopped: {}", table.len(), table.termination());

            let last_row = (max_range + 1) as f64;
            let rows: Vec<&TrajectorySample> = table
                .every(interval)
                .take_while(|s| s.range_yards < last_row)
                .collect();
            display_trajectory(&solver, zero.angle_degrees, &table, rows, output)?;
        }

        Commands::Zero { load, conditions, output } => {
            let solver = TrajectorySolver::new(load.inputs(0.0), WindConditions::default(), conditions.atmosphere());
            let zero = solver.zero()?;
            let report = ZeroReport {
                drag_function: load.drag_function,
                zero_range: load.zero_range,
                zero_angle_degrees: zero.angle_degrees,
                zero_angle_moa: exterior_ballistics::deg_to_moa(zero.angle_degrees),
                iterations: zero.iterations,
            };
            display_zero(&report, output)?;
        }

        Commands::Pbr {
            load,
            conditions,
            vital_size,
            output,
        } => {
            let solver = TrajectorySolver::new(load.inputs(0.0), WindConditions::default(), conditions.atmosphere());
            let pbr = solver.point_blank_range(vital_size)?;
            display_pbr(&pbr, vital_size, output)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      EXTERIOR BALLISTICS v{:<8}     ║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Point-mass trajectory tables for       ║");
            println!("║ small-arms projectiles.                ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Drag functions: G1 G2 G3 G4 G5 G6 G7 G8║");
            println!("║ • One-yard trajectory tables           ║");
            println!("║ • Zero angle search                    ║");
            println!("║ • Point-blank range                    ║");
            println!("║ • Atmosphere and wind corrections      ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_trajectory(
    solver: &TrajectorySolver,
    zero_angle: f64,
    table: &TrajectoryTable,
    rows: Vec<&TrajectorySample>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let inputs = solver.inputs();
    match format {
        OutputFormat::Json => {
            let report = TrajectoryReport {
                drag_function: inputs.drag_function,
                ballistic_coefficient: inputs.ballistic_coefficient,
                muzzle_velocity: inputs.muzzle_velocity,
                zero_angle_degrees: zero_angle,
                termination: table.termination().to_string(),
                samples: rows,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for sample in rows {
                writer.serialize(sample)?;
            }
            writer.flush()?;
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Drag Function:     {:>8}            ║", inputs.drag_function);
            println!("║ BC (corrected):    {:>8.4}            ║", solver.corrected_coefficient());
            println!("║ Muzzle Velocity:   {:>8.1} ft/s       ║", inputs.muzzle_velocity);
            println!("║ Zero Angle:        {:>8.4} deg        ║", zero_angle);
            println!("║ Valid Yardages:    {:>8}            ║", table.len());
            println!("╚════════════════════════════════════════╝");

            println!();
            println!("┌───────┬──────────┬─────────┬─────────┬──────────┬─────────┬──────────┐");
            println!("│ Yards │ Path(in) │ MOA     │ Time(s) │ Wind(in) │ Wind MOA│ Vel(fps) │");
            println!("├───────┼──────────┼─────────┼─────────┼──────────┼─────────┼──────────┤");
            for s in rows {
                println!(
                    "│ {:>5.0} │ {:>8.2} │ {:>7.2} │ {:>7.3} │ {:>8.2} │ {:>7.2} │ {:>8.1} │",
                    s.range_yards.floor(),
                    s.path_inches,
                    s.moa_correction,
                    s.seconds,
                    s.windage_inches,
                    s.windage_moa,
                    s.velocity
                );
            }
            println!("└───────┴──────────┴─────────┴─────────┴──────────┴─────────┴──────────┘");
        }
    }

    Ok(())
}

fn display_zero(report: &ZeroReport, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.serialize(report)?;
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║            ZERO ANGLE                  ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Zero Range:        {:>8.1} yd         ║", report.zero_range);
            println!("║ Angle:             {:>8.4} deg        ║", report.zero_angle_degrees);
            println!("║ Angle:             {:>8.2} MOA        ║", report.zero_angle_moa);
            println!("║ Iterations:        {:>8}            ║", report.iterations);
            println!("╚════════════════════════════════════════╝");
        }
    }
    Ok(())
}

fn display_pbr(pbr: &PbrSolution, vital_size: f64, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(pbr)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.serialize(pbr)?;
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║        POINT BLANK RANGE               ║");
            println!("║        {:>5.1} in vital zone            ║", vital_size);
            println!("╠════════════════════════════════════════╣");
            println!("║ Near Zero:         {:>8} yd         ║", pbr.near_zero_yards);
            println!("║ Far Zero:          {:>8} yd         ║", pbr.far_zero_yards);
            println!("║ Minimum PBR:       {:>8} yd         ║", pbr.min_pbr_yards);
            println!("║ Maximum PBR:       {:>8} yd         ║", pbr.max_pbr_yards);
            println!("║ Vertex:            {:>8} yd         ║", pbr.vertex_yards);
            println!("║ Sight-in @100 yd:  {:>+8.2} in         ║", pbr.sight_in_inches());
            println!("╚════════════════════════════════════════╝");
        }
    }
    Ok(())
}
