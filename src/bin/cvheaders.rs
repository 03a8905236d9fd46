fn main() {
    if let Err(e) = cvtools::headers::run() {
        eprintln!("Erro ao ler o ficheiro Excel: {e:#}");
        std::process::exit(1);
    }
}
