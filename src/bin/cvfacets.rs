fn main() {
    if let Err(err) = cvtools::facets::run() {
        eprintln!("Erro ao processar o ficheiro Excel: {err:#}");
        std::process::exit(1);
    }
}
