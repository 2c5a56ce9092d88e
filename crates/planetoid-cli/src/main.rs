/// Offline harness for driving the planetoid generation pipeline end to end
/// and exercising a handful of surface queries against the result.
use anyhow::{Context, Result};
use clap::Parser;
use planetoid_core::habitability::HabitabilityRequirements;
use planetoid_core::persistence::PlanetoidRecord;
use planetoid_core::planet_type::PlanetType;
use planetoid_core::planetoid::{GenerationParams, Planetoid};
use planetoid_core::{surface, vector::Vec3};

#[derive(Parser, Debug)]
#[command(name = "planetoid-cli", about = "Generate a planetoid and print a JSON summary")]
struct Args {
    /// Master seed for deterministic generation.
    #[arg(short, long, default_value_t = 1)]
    seed: u32,

    /// Restrict generation to a specific planet type (terrestrial, ocean,
    /// carbon, iron, lava, gas-giant, ice-giant, dwarf, lava-dwarf,
    /// rocky-dwarf, asteroid-c, asteroid-m, asteroid-s, comet).
    #[arg(short = 't', long)]
    planet_type: Option<String>,

    /// Require the retry loop to keep re-rolling until the body satisfies
    /// the default habitability requirements, instead of accepting whatever
    /// the seed produces.
    #[arg(long)]
    require_habitable: bool,

    /// Select the Earth-like N2/O2/CO2/Ar atmosphere mixture on the
    /// terrestrial thick-atmosphere path, instead of the CO2-dominated
    /// default.
    #[arg(long)]
    earthlike: bool,

    /// Print elevation/temperature/illumination at this latitude (radians)
    /// in addition to the generation summary.
    #[arg(long)]
    sample_lat: Option<f64>,

    /// Longitude (radians) paired with `--sample-lat`.
    #[arg(long, default_value_t = 0.0)]
    sample_lon: f64,
}

fn parse_planet_type(name: &str) -> Result<PlanetType> {
    Ok(match name.to_ascii_lowercase().replace('_', "-").as_str() {
        "terrestrial" => PlanetType::Terrestrial,
        "ocean" => PlanetType::Ocean,
        "carbon" => PlanetType::Carbon,
        "iron" => PlanetType::Iron,
        "lava" => PlanetType::Lava,
        "gas-giant" => PlanetType::GasGiant,
        "ice-giant" => PlanetType::IceGiant,
        "dwarf" => PlanetType::Dwarf,
        "lava-dwarf" => PlanetType::LavaDwarf,
        "rocky-dwarf" => PlanetType::RockyDwarf,
        "asteroid-c" => PlanetType::AsteroidC,
        "asteroid-m" => PlanetType::AsteroidM,
        "asteroid-s" => PlanetType::AsteroidS,
        "comet" => PlanetType::Comet,
        other => anyhow::bail!("unrecognized planet type: {other}"),
    })
}

fn to_record(planetoid: &Planetoid) -> PlanetoidRecord {
    PlanetoidRecord {
        id: planetoid.id,
        master_seed: planetoid.master_seed,
        planet_type: planetoid.planet_type,
        parent_id: planetoid.parent_id,
        absolute_position: Vec3::ZERO,
        name: planetoid.name.clone(),
        velocity: Vec3::ZERO,
        orbit: planetoid.orbit,
        position: Vec3::ZERO,
        temperature: Some(planetoid.temperature.average),
        angle_of_rotation: planetoid.axis.angle_of_rotation,
        rotational_period: planetoid.rotational_period,
        satellite_ids: (0..planetoid.satellites.len() as u64).collect(),
        rings: planetoid
            .rings
            .as_ref()
            .map(|system| {
                system
                    .bands
                    .iter()
                    .map(|band| planetoid_core::persistence::RingBandRecord {
                        inner_radius: band.inner_radius,
                        outer_radius: band.outer_radius,
                        composition: band.composition.name().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        blackbody_temperature: planetoid.temperature.blackbody,
        surface_temperature_apoapsis: planetoid.temperature.at_apoapsis,
        surface_temperature_periapsis: planetoid.temperature.at_periapsis,
        inhospitable: planetoid.is_inhospitable(),
        earthlike: planetoid.is_earthlike(),
        planet_params: None,
        habitability_requirements: None,
        surface_regions: Vec::new(),
        overlays: Vec::new(),
        max_flow: None,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let planet_type = args.planet_type.as_deref().map(parse_planet_type).transpose()?;
    let params = GenerationParams { planet_type, earthlike: args.earthlike, ..Default::default() };

    let planetoid = if args.require_habitable {
        let requirements = HabitabilityRequirements::default();
        Planetoid::generate_habitable(1, args.seed, &params, &requirements)
            .context("no habitable planetoid found within the retry budget")?
    } else {
        Planetoid::generate(1, args.seed, &params).context("planetoid generation failed")?
    };

    let record = to_record(&planetoid);
    println!("{}", record.to_json().context("serializing planetoid record")?);

    if let Some(lat) = args.sample_lat {
        let lon = args.sample_lon;
        eprintln!("elevation:   {:.1} m", surface::elevation_at(&planetoid, lat, lon));
        eprintln!("temperature: {:.1} K", surface::temperature_at(&planetoid, lat, lon, 0.0));
        eprintln!("pressure:    {:.3} kPa", surface::atmospheric_pressure_at(&planetoid, lat, lon));
        eprintln!("illumination:{:.3}", surface::illumination_at(&planetoid, lat, lon, 0.0));
        let (sunrise, sunset) = surface::sunrise_sunset(&planetoid, lat, 0.0);
        match (sunrise, sunset) {
            (Some(sunrise), Some(sunset)) => eprintln!("sunrise/sunset: {sunrise:.3} / {sunset:.3} (day fraction)"),
            (None, Some(_)) => eprintln!("sunrise/sunset: polar night at this latitude"),
            (Some(_), None) => eprintln!("sunrise/sunset: midnight sun at this latitude"),
            (None, None) => eprintln!("sunrise/sunset: no star to reference"),
        }
    }

    Ok(())
}
