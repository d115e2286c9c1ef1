use moyai_component::ThemeOverride;
use moyai_story::{ProgressStory, create_new_window, init, load_theme};

fn main() {
    // Parse `cargo run -- <theme.json>` or `cargo run -- --theme-schema`
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--theme-schema") {
        match ThemeOverride::json_schema()
            .and_then(|schema| Ok(serde_json::to_string_pretty(&schema)?))
        {
            Ok(schema) => println!("{}", schema),
            Err(err) => {
                eprintln!("{:?}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    let app = gpui_platform::application();
    app.run(move |cx| {
        init(cx);
        if let Some(path) = arg.as_deref() {
            load_theme(path, cx);
        }
        cx.activate(true);

        create_new_window("Progress Gallery", ProgressStory::view, cx);
    });
}
