use demand_profiles::{
    plot, resample, DataRepo, DateRange, DayHourGrid, DemandKind, Granularity, ProfilesLoader,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "demand-profiles",
    about = "Statistics and charts of simulated neighborhood demand profiles"
)]
struct Opt {
    /// Path to the demand profile CSV file (gzipped or plain)
    #[structopt(long)]
    path: String,
    /// Project folder holding the input and output directories
    #[structopt(long, default_value = ".")]
    repo: String,
    /// Demand category: heat or electricity
    #[structopt(short, long)]
    kind: Option<DemandKind>,
    /// Unit columns regular expression filter
    #[structopt(short, long)]
    filter: Option<String>,
    /// First day to load (YYYY-MM-DD)
    #[structopt(short, long)]
    start: Option<String>,
    /// Last day to load (YYYY-MM-DD)
    #[structopt(short, long)]
    end: Option<String>,
    /// Also summarize the resampled table: daily, weekly or monthly
    #[structopt(short, long)]
    granularity: Option<Granularity>,
    /// Pivot this unit column into a day x hour heatmap
    #[structopt(long)]
    unit: Option<String>,
    /// Plot the demand envelope
    #[structopt(short, long)]
    plot: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut loader = ProfilesLoader::default().data_path(&opt.path);
    if let Some(kind) = opt.kind {
        loader = loader.header_filter(kind.header_filter());
    }
    if let Some(arg) = opt.filter {
        loader = loader.header_filter(arg);
    }
    if let Some(arg) = &opt.start {
        loader = loader.start_date(arg.as_str());
    }
    if let Some(arg) = &opt.end {
        loader = loader.end_date(arg.as_str());
    }

    let table = loader.load()?.sanitize();
    table.summary();

    if let Some(granularity) = opt.granularity {
        println!("{granularity} sums:");
        resample(&table, granularity).summary();
    }

    if opt.plot && !table.is_empty() {
        let repo = DataRepo::new(&opt.repo);
        repo.ensure()?;
        let time = table.time();
        let span = DateRange::new(time[0], time[time.len() - 1]);
        plot::plot_envelope_span(
            repo.output().join("demand-envelope.svg"),
            std::slice::from_ref(&table),
            &["units"],
            &span,
            "Demand",
        )
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if let Some(unit) = &opt.unit {
            let grid = DayHourGrid::from_table(&table, unit)?;
            plot::plot_day_hour_heatmap(repo.output().join("demand-distribution.svg"), &grid)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
    }

    Ok(())
}
