//! FDS disk image export binary

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use clap::{Args, Parser, Subcommand};
use fds_image::{ExportLog, ExportOptions, ProjectFile, TemplateDirectory};

use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::PathBuf;

macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit(1);
    }};
}

#[derive(Parser)]
#[command(author, version)]
#[command(about = "FDS disk image exporter")]
#[command(arg_required_else_help = true)]
struct ArgParser {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a project to an FDS disk image
    Export(ExportArgs),

    /// Print the files and song table of an FDS disk image
    Info(InfoArgs),
}

// Export
// ======

#[derive(Args)]
struct ExportArgs {
    #[arg(short = 'o', long, value_name = "FILE", help = "output .fds file")]
    output: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        help = "directory containing fds_famistudio.fds and fds_famitracker.fds"
    )]
    templates: PathBuf,

    #[arg(
        long = "song",
        value_name = "NAME",
        help = "only export the named song (can be repeated)"
    )]
    songs: Vec<String>,

    #[arg(long, value_name = "NAME", help = "override the project name")]
    name: Option<String>,

    #[arg(long, value_name = "AUTHOR", help = "override the project author")]
    author: Option<String>,

    #[arg(value_name = "JSON_FILE", help = "project json file")]
    json_file: PathBuf,
}

fn export(args: ExportArgs) {
    let project_file = load_project_file(args.json_file);

    let (project, mut songs) = match project_file.to_project(&args.songs) {
        Ok(p) => p,
        Err(e) => error!("{}: {}", project_file.file_name, e),
    };

    let templates = TemplateDirectory::new(args.templates);
    let options = ExportOptions {
        name: args.name,
        author: args.author,
    };

    let mut log = ExportLog::new();

    let r = fds_image::export_fds_file(
        &args.output,
        &project,
        &mut songs,
        &templates,
        &options,
        &mut log,
    );

    // `ExportLog` messages have already been forwarded to `tracing`
    if r.is_err() {
        error!("Cannot export {}", project_file.file_name);
    }
}

// Info
// ====

#[derive(Args)]
struct InfoArgs {
    #[arg(value_name = "FDS_FILE", help = "fds disk image")]
    image: PathBuf,
}

fn info(args: InfoArgs) {
    let data = match fs::read(&args.image) {
        Ok(d) => d,
        Err(e) => error!("Cannot read {}: {}", args.image.display(), e),
    };

    let contents = match fds_image::read_fds_image(&data) {
        Ok(c) => c,
        Err(e) => error!("{}: {}", args.image.display(), e),
    };

    println!("{} files", contents.file_count);
    for f in &contents.files {
        println!(
            "  {:3} {:8} ${:04x} {:6} bytes",
            f.index,
            f.name_string(),
            f.load_addr,
            f.length
        );
    }
    println!();

    let info = &contents.toc.project_info;
    println!("Name:   {}", info.name_string());
    println!("Author: {}", info.author_string());
    if info.first_dpcm_bank != 0 {
        println!("DPCM:   file {}", info.first_dpcm_bank);
    }
    println!();

    for (i, s) in contents.toc.used_songs().iter().enumerate() {
        print!(
            "  {:2} {:28} file {:3} ${:04x}",
            i,
            s.name_string(),
            s.bank,
            s.address
        );
        if s.uses_dpcm() {
            print!(" dpcm {}", s.flags);
        }
        println!();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ArgParser::parse();

    match args.command {
        Command::Export(c) => export(c),
        Command::Info(c) => info(c),
    }
}

fn load_project_file(path: PathBuf) -> ProjectFile {
    match fds_image::load_project_file(path) {
        Ok(p) => p,
        Err(e) => error!("{}", e),
    }
}
