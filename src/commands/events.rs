use anyhow::Result;
use owo_colors::OwoColorize;
use storyline_core::date::min_max_dates;
use storyline_core::filter::EventFilter;
use storyline_core::project::Project;
use storyline_core::table::table_rows;

pub fn run(project: &Project, filter: EventFilter) -> Result<()> {
    let rows = table_rows(&project.events, &filter);

    println!("{}", project.name.bold());

    if rows.is_empty() {
        println!("{}", "No events match the current filters".dimmed());
        return Ok(());
    }

    for row in &rows {
        let date = if row.date_label.is_empty() { "(no date)" } else { row.date_label.as_str() };
        println!("  {:<25} {}", date.dimmed(), row.title);
        if !row.description.is_empty() {
            println!("  {:<25} {}", "", row.description.dimmed());
        }
    }

    let visible: Vec<_> = filter.apply(&project.events).into_iter().cloned().collect();
    let undated = rows.iter().filter(|r| r.date.is_none()).count();
    match min_max_dates(&visible) {
        Some(range) => println!(
            "\n{}",
            format!("{} events, {} to {}, {} undated", rows.len(), range.min, range.max, undated).dimmed()
        ),
        None => println!("\n{}", format!("{} events, none dated", rows.len()).dimmed()),
    }

    Ok(())
}
