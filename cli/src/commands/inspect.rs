use std::process::ExitCode;

use anyhow::Result;
use districtor::io::counties::read_counties;

use crate::cli::{Cli, InspectArgs};

pub fn run(cli: &Cli, args: &InspectArgs) -> Result<ExitCode> {
    let graph = read_counties(&args.input)?;

    let one_way = (0..graph.node_count())
        .flat_map(|u| graph.edges(u).map(move |v| (u, v)))
        .filter(|&(u, v)| !graph.is_adjacent(v, u))
        .collect::<Vec<_>>();
    let isolated = (0..graph.node_count()).filter(|&u| graph.degree(u) == 0).count();
    let margin = graph.units().iter().map(|u| u.margin()).sum::<i64>();

    println!("units:            {}", graph.node_count());
    println!("adjacency entries: {}", graph.edge_count());
    println!("total population: {}", graph.total_population());
    println!("total margin:     {margin}");
    println!("isolated units:   {isolated}");
    println!("one-way edges:    {}", one_way.len());

    if cli.verbose > 0 {
        for (u, v) in one_way {
            eprintln!("[inspect] {} lists {} but not the reverse", graph.unit(u).name(), graph.unit(v).name());
        }
    }

    Ok(ExitCode::SUCCESS)
}
