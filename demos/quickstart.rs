use tad_api::{
    AstronomyObjectType, AstronomyService, Credentials, DateTime, ServiceConfig, TimeService,
};

fn main() -> Result<(), tad_api::Error> {
    let credentials = Credentials::from_env()?;
    let config = ServiceConfig::default();

    let time = TimeService::new(credentials.clone(), config.clone())?;
    for location in time.current_time_for_place(&["norway/oslo".into()])? {
        let name = location
            .geography
            .as_ref()
            .and_then(|geo| geo.name.as_deref())
            .unwrap_or("?");
        let iso = location.time.as_ref().map_or("", |time| time.iso.as_str());
        println!("{name}: {iso}");
        for sun in &location.astronomy {
            if let (Some(rise), Some(set)) = (sun.sunrise(), sun.sunset()) {
                println!(
                    "  sunrise {:02}:{:02}, sunset {:02}:{:02}",
                    rise.hour.unwrap_or_default(),
                    rise.minute.unwrap_or_default(),
                    set.hour.unwrap_or_default(),
                    set.minute.unwrap_or_default()
                );
            }
        }
    }

    let astronomy = AstronomyService::new(credentials, config)?;
    let start = DateTime::from_ymd(2021, 6, 21)?;
    for location in astronomy.astronomical_info(AstronomyObjectType::Moon, "norway/oslo", start, None)? {
        for object in &location.objects {
            for day in &object.days {
                println!("{}: moon phase {:?}", object.name, day.moon_phase);
            }
        }
    }
    Ok(())
}
