use clap::Parser as _;

fn main() {
    let cli = plc_drv::Cli::parse();
    plc_drv::init_tracing(cli.verbose);
    if let Err(err) = plc_drv::run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
