use aiven_provider_core::{ResourceId, build_resource_id};

pub fn encode(parts: &[String]) {
    println!("{}", build_resource_id(parts));
}

pub fn decode(id: &str, arity: usize) -> anyhow::Result<()> {
    anyhow::ensure!(arity > 0, "--arity must be at least 1");
    let id = ResourceId::parse(id, arity)?;
    for part in id.parts() {
        println!("{}", part);
    }
    Ok(())
}
