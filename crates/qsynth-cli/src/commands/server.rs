use qsynth_server::ServerConfig;

pub fn run(config: ServerConfig) {
    let base = format!("http://{}", config.addr());

    println!("qsynth Server v{}", qsynth_core::VERSION);
    println!("   {base}");
    println!();
    println!("   Endpoints:");
    println!("     GET  /                 API index (try: curl {base})");
    println!("     GET  /health           Health check");
    println!("     POST /generate/rabi    Rabi oscillation dataset");
    println!("     POST /generate/decay   T1/T2 decay dataset");
    println!("     POST /generate/bell    Bell-state dataset with CHSH");
    println!();
    println!(
        "   Limits: time_steps <= {}, shots <= {}",
        config.max_time_steps, config.max_shots
    );
    println!();
    println!("   Examples:");
    println!("     curl -X POST {base}/generate/rabi -H 'content-type: application/json' -d '{{\"seed\": 42}}'");
    println!("     curl -X POST {base}/generate/bell -H 'content-type: application/json' -d '{{\"theta\": 0.785, \"shots\": 5000}}'");
    println!();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(qsynth_server::run_server(config)) {
        eprintln!("Error: server stopped: {e}");
        std::process::exit(1);
    }
}
