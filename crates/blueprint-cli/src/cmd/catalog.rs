use crate::output::{print_json, print_table};
use blueprint_core::catalog;

pub fn run(json: bool) -> anyhow::Result<()> {
    let stages = catalog::all();
    if json {
        print_json(&stages)?;
        return Ok(());
    }

    for def in stages {
        println!("{} ({})", def.title, def.stage);
        let rows = def
            .questions
            .iter()
            .map(|q| vec![q.id.to_string(), q.kind.as_str().to_string(), q.text.to_string()])
            .collect();
        print_table(&["ID", "TYPE", "QUESTION"], rows);
        println!();
    }
    Ok(())
}
