//! Route definitions for the web GUI

/// All routes defined in the application
pub const ROUTES: &[(&str, &str, &str)] = &[
    // Page routes
    ("GET", "/", "Search page"),

    // HTMX partial routes
    ("POST", "/htmx/vehicle/:field", "Select year, make or model"),
    ("POST", "/htmx/part/category", "Select part category"),
    ("POST", "/htmx/part/name", "Select part name"),
    ("POST", "/htmx/part/custom-name", "Set custom part name"),
    ("POST", "/htmx/part/number", "Set optional part number"),
    ("POST", "/htmx/search", "Run interchange search"),
    ("POST", "/htmx/copy", "Mark a part number as copied"),
    ("GET", "/htmx/results", "Results panel partial"),

    // API routes
    ("GET", "/api/health", "Health check"),
    ("GET", "/api/catalog/years", "Model years, newest first"),
    ("GET", "/api/catalog/makes", "Vehicle makes"),
    ("GET", "/api/catalog/models", "Models for ?make="),
    ("GET", "/api/catalog/categories", "Part categories"),
    ("GET", "/api/catalog/parts", "Parts for ?category="),
    ("POST", "/api/search", "Search API"),

    // Static assets
    ("GET", "/static/style.css", "CSS stylesheet"),
];

/// Print all routes
pub fn print_routes() {
    println!("\nParts Interchange Buddy Routes:");
    println!("{:-<60}", "");
    for (method, path, desc) in ROUTES {
        println!("{:6} {:30} {}", method, path, desc);
    }
    println!();
}
