use anyhow::Result;

fn main() -> Result<()> {
    gencheck::cli::run()
}
