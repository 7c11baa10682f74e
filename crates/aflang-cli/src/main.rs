fn main() -> anyhow::Result<()> {
    aflang_cli::run()
}
