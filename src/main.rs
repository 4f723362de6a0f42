use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_cvrp::constructive::{GreedySearch, RandomSearch};
use u_cvrp::evaluation::{FitnessWeights, RunResult};
use u_cvrp::ga::{GaConfig, GeneticAlgorithm};
use u_cvrp::io::results::{write_experiment, ExperimentRow, ResultRecord, ResultsLog};
use u_cvrp::io::{find_instances, read_instance};
use u_cvrp::models::Instance;
use u_cvrp::tabu::{TabuConfig, TabuSearch};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every algorithm on every instance and append to overall_results.csv.
    RunAll {
        #[clap(long, default_value = "data")]
        data_dir: PathBuf,
        #[clap(long, default_value = "results")]
        results_dir: PathBuf,
        /// Samples for random/greedy and steps for tabu search.
        #[clap(long, default_value_t = 1000)]
        iterations: usize,
        #[clap(long, default_value_t = 1000)]
        generations: usize,
        #[clap(long, default_value_t = 42)]
        seed: u64,
    },
    /// Sweep one GA parameter on a single instance.
    Experiment {
        #[clap(long)]
        instance: PathBuf,
        #[clap(long, value_enum)]
        parameter: Parameter,
        #[clap(long, value_delimiter = ',', required = true)]
        values: Vec<String>,
        #[clap(long, default_value = "results")]
        results_dir: PathBuf,
        #[clap(long, default_value_t = 1000)]
        generations: usize,
        #[clap(long, default_value_t = 42)]
        seed: u64,
    },
    /// Run one algorithm on one instance and print the result.
    Solve {
        #[clap(long)]
        instance: PathBuf,
        #[clap(long, value_enum)]
        algorithm: Algorithm,
        #[clap(long, default_value_t = 1000)]
        iterations: usize,
        #[clap(long, default_value_t = 1000)]
        generations: usize,
        #[clap(long, default_value_t = 42)]
        seed: u64,
        /// Print the full result as JSON.
        #[clap(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Algorithm {
    Random,
    Greedy,
    Genetic,
    Tabu,
}

impl Algorithm {
    const ALL: [Algorithm; 4] = [
        Algorithm::Random,
        Algorithm::Greedy,
        Algorithm::Genetic,
        Algorithm::Tabu,
    ];

    fn label(self) -> &'static str {
        match self {
            Algorithm::Random => "Random Search",
            Algorithm::Greedy => "Greedy Search",
            Algorithm::Genetic => "Genetic Algorithm",
            Algorithm::Tabu => "Tabu Search",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Parameter {
    PopulationSize,
    CrossoverRate,
    MutationRate,
}

impl Parameter {
    fn file_stem(self) -> &'static str {
        match self {
            Parameter::PopulationSize => "population",
            Parameter::CrossoverRate => "crossover",
            Parameter::MutationRate => "mutation",
        }
    }

    fn apply(self, config: GaConfig, value: &str) -> Result<GaConfig> {
        Ok(match self {
            Parameter::PopulationSize => config.with_population_size(
                value
                    .parse()
                    .with_context(|| format!("invalid population size '{value}'"))?,
            ),
            Parameter::CrossoverRate => {
                config.with_crossover_rate(parse_rate(value, "crossover rate")?)
            }
            Parameter::MutationRate => {
                config.with_mutation_rate(parse_rate(value, "mutation rate")?)
            }
        })
    }
}

fn parse_rate(value: &str, what: &str) -> Result<f64> {
    let rate: f64 = value
        .parse()
        .with_context(|| format!("invalid {what} '{value}'"))?;
    if !(0.0..=1.0).contains(&rate) {
        bail!("{what} {rate} outside [0, 1]");
    }
    Ok(rate)
}

struct Budget {
    iterations: usize,
    generations: usize,
    seed: u64,
}

fn run_algorithm(instance: &Instance, algorithm: Algorithm, budget: &Budget) -> Result<RunResult> {
    let mut rng = StdRng::seed_from_u64(budget.seed);
    let weights = FitnessWeights::default();
    let result = match algorithm {
        Algorithm::Random => RandomSearch::new(instance).run(&mut rng, budget.iterations, weights)?,
        Algorithm::Greedy => GreedySearch::new(instance).run(&mut rng, budget.iterations, weights)?,
        Algorithm::Genetic => {
            let config = GaConfig::default()
                .with_generations(budget.generations)
                .with_parallel(cfg!(feature = "parallel"));
            GeneticAlgorithm::new(instance, config)?.run(&mut rng)?
        }
        Algorithm::Tabu => {
            let config = TabuConfig::default().with_iterations(budget.iterations);
            TabuSearch::new(instance, config)?.run(&mut rng)?
        }
    };
    Ok(result)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_all(data_dir: &Path, results_dir: &Path, budget: &Budget) -> Result<()> {
    let instances = find_instances(data_dir)
        .with_context(|| format!("cannot scan {}", data_dir.display()))?;
    let log = ResultsLog::new(results_dir)?;
    info!(count = instances.len(), data_dir = %data_dir.display(), "running all algorithms");

    for path in &instances {
        let name = file_name(path);
        let instance = match read_instance(path) {
            Ok(instance) => instance,
            Err(err) => {
                error!(file = %name, %err, "skipping instance");
                continue;
            }
        };

        for algorithm in Algorithm::ALL {
            let result = run_algorithm(&instance, algorithm, budget)
                .with_context(|| format!("{} failed on {name}", algorithm.label()))?;
            log.append(&ResultRecord::from_run(name.clone(), algorithm.label(), &result))?;
        }
    }

    info!(results = %log.path().display(), "done");
    Ok(())
}

fn experiment(
    instance_path: &Path,
    parameter: Parameter,
    values: &[String],
    results_dir: &Path,
    budget: &Budget,
) -> Result<()> {
    let instance = read_instance(instance_path)
        .with_context(|| format!("cannot read {}", instance_path.display()))?;

    let mut rows = Vec::with_capacity(values.len());
    for value in values {
        let config = parameter.apply(GaConfig::default().with_generations(budget.generations), value)?;
        info!(parameter = parameter.file_stem(), value = %value, "experiment run");

        let mut rng = StdRng::seed_from_u64(budget.seed);
        let result = GeneticAlgorithm::new(&instance, config)?.run(&mut rng)?;
        rows.push(ExperimentRow {
            value: value.clone(),
            best: result.best_fitness,
            worst: result.worst_fitness,
            average: result.average_fitness,
        });
    }

    let path = write_experiment(results_dir, parameter.file_stem(), &rows)?;
    info!(results = %path.display(), "experiment written");
    Ok(())
}

fn solve(instance_path: &Path, algorithm: Algorithm, budget: &Budget, json: bool) -> Result<()> {
    let instance = read_instance(instance_path)
        .with_context(|| format!("cannot read {}", instance_path.display()))?;
    let result = run_algorithm(&instance, algorithm, budget)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{} on {}", algorithm.label(), file_name(instance_path));
    println!("  best fitness    {:.2}", result.best_fitness);
    println!("  worst fitness   {:.2}", result.worst_fitness);
    println!("  average fitness {:.2}", result.average_fitness);
    println!("  distance        {:.2}", result.best_total_distance);
    println!("  vehicles        {}", result.best_vehicle_count);
    for (i, route) in result.best_solution.routes().iter().enumerate() {
        let nodes: Vec<String> = route.nodes().iter().map(|n| n.to_string()).collect();
        println!("  route {:>3}: {}", i + 1, nodes.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::RunAll {
            data_dir,
            results_dir,
            iterations,
            generations,
            seed,
        } => run_all(
            &data_dir,
            &results_dir,
            &Budget {
                iterations,
                generations,
                seed,
            },
        ),
        Command::Experiment {
            instance,
            parameter,
            values,
            results_dir,
            generations,
            seed,
        } => experiment(
            &instance,
            parameter,
            &values,
            &results_dir,
            &Budget {
                iterations: 0,
                generations,
                seed,
            },
        ),
        Command::Solve {
            instance,
            algorithm,
            iterations,
            generations,
            seed,
            json,
        } => solve(
            &instance,
            algorithm,
            &Budget {
                iterations,
                generations,
                seed,
            },
            json,
        ),
    }
}
