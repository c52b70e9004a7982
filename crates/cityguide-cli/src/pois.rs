//! The `pois` command: fetch, optionally refine, and print.

use cityguide_core::{AppConfig, CategoryFilter, Poi};
use cityguide_overpass::OverpassClient;

pub(crate) async fn run(
    config: &AppConfig,
    city: &str,
    filters: &[String],
    category: Option<CategoryFilter>,
    json: bool,
) -> anyhow::Result<()> {
    let client = OverpassClient::new(config)?;
    let filter_refs: Vec<&str> = filters.iter().map(String::as_str).collect();

    let mut pois = client.fetch_pois(city, &filter_refs).await;
    if let Some(filter) = category {
        pois.retain(|poi| poi.matches(filter));
    }

    if pois.is_empty() {
        println!("no POIs found for {city}");
        return Ok(());
    }

    if json {
        for poi in &pois {
            println!("{}", serde_json::to_string(poi)?);
        }
    } else {
        print_table(&pois);
    }

    Ok(())
}

fn print_table(pois: &[Poi]) {
    for poi in pois {
        println!(
            "{:<12} {:>9.5} {:>9.5}  {}",
            poi.category.as_str(),
            poi.lat,
            poi.lng,
            poi.name
        );
    }
    println!("{} POIs", pois.len());
}
