use lunisol::{lunar_anniversary, solar_to_lunar, SolarDate};

fn main() {
    let today = SolarDate::from(chrono::Utc::now().date_naive());
    let lunar = solar_to_lunar(today);
    println!("solar {today} → lunar {lunar}, year {}", lunar.year_name());

    // Project a recurring lunar anniversary (Vu Lan, 15th of month 7)
    // onto the coming solar years.
    for year in today.year..today.year + 5 {
        match lunar_anniversary(15, 7, year) {
            Some(date) => println!("Vu Lan {year}: {date}"),
            None => println!("Vu Lan {year}: no such day"),
        }
    }
}
