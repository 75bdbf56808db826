#![allow(dead_code, non_snake_case, non_upper_case_globals)]

use std::path::PathBuf;
use anyhow::Context;
use ndarray as nd;
use num_complex::Complex64 as C64;
use fock_states::{
    mkdir,
    write_npz,
    layout::{ to_grouped, to_interleaved },
    postselect::herald_dual_pair_dm,
    states::{ outer_prod, qubit_state_from_spec, Combine },
};

#[derive(Clone, Debug)]
struct Config {
    cutoff: usize,
    spec: String,
    outdir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cutoff: 5,
            spec: "00+11".to_string(),
            outdir: PathBuf::from("output/bell_herald"),
        }
    }
}

fn read_config(path: &str) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read config file {}", path))?;
    let table: toml::Table = text.parse()
        .with_context(|| format!("couldn't parse config file {}", path))?;
    let mut config = Config::default();
    if let Some(cutoff) = table.get("cutoff") {
        config.cutoff
            = cutoff.as_integer()
            .context("config key 'cutoff' must be an integer")?
            as usize;
    }
    if let Some(spec) = table.get("spec") {
        config.spec
            = spec.as_str()
            .context("config key 'spec' must be a string")?
            .to_string();
    }
    if let Some(outdir) = table.get("outdir") {
        config.outdir
            = outdir.as_str()
            .context("config key 'outdir' must be a string")?
            .into();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let Config { cutoff, spec, outdir }
        = match std::env::args().nth(1) {
            Some(path) => read_config(&path)?,
            None => Config::default(),
        };
    mkdir!(outdir);

    let psi: nd::Array1<C64>
        = qubit_state_from_spec(&spec, cutoff, Combine::Kron)?
        .into_dimensionality::<nd::Ix1>()?;
    let num_modes: usize
        = 2 * spec.split(|ch: char| ch == '+' || ch == '-')
        .find(|term| !term.is_empty())
        .map(str::len)
        .unwrap_or(0);
    println!("spec '{}': {} modes, dimension {}", spec, num_modes, psi.len());

    let rho = outer_prod(&psi, &psi);
    let rho_interleaved = to_interleaved(rho.clone(), cutoff, num_modes)?;
    let rho_back = to_grouped(rho_interleaved, num_modes)?;
    anyhow::ensure!(rho_back == rho, "layout round trip failed");
    println!("layout round trip verified");

    let mut rho = rho;
    if num_modes == 4 {
        herald_dual_pair_dm(&mut rho, cutoff)?;
        println!("applied dual-pair herald");
    } else {
        println!("skipping dual-pair herald: spec has {} modes", num_modes);
    }

    write_npz!(
        outdir.join("data.npz"),
        arrays: {
            "psi" => &psi,
            "rho" => &rho,
        }
    );

    println!("done");
    Ok(())
}
