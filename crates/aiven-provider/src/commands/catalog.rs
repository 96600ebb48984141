use aiven_provider_core::catalog::{DATA_SOURCE_TYPES, RESOURCE_TYPES};

pub fn handle(data_sources: bool) {
    let names = if data_sources {
        DATA_SOURCE_TYPES
    } else {
        RESOURCE_TYPES
    };
    for name in names {
        println!("{}", name);
    }
}
