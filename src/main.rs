use sphera::Visualization;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Visualization::new().run()?;
    Ok(())
}
