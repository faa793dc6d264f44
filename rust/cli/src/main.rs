use std::io;

fn main() {
    // PLAYER_NAME and friends may live in a .env file next to the logs
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let code = handparse_cli::run_with_stdin(
        args,
        &mut io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    );
    std::process::exit(code);
}
