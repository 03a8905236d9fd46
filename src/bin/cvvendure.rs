fn main() {
    if let Err(err) = cvtools::vendure::run() {
        eprintln!("Erro ao gerar o CSV de import: {err:#}");
        std::process::exit(1);
    }
}
