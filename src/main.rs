fn main() -> anyhow::Result<()> {
    efield_sim::app::run()
}
