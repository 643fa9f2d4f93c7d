use package_validation::{
    ErrorReporter, MessageCatalog, PackageRef, PackageValidationError, Result, SystemError,
};

fn inspect_archive(path: &str) -> Result<()> {
    // Simulate an archive whose package conflicts with installed packages
    if path.ends_with("forum.tar") {
        return Err(PackageValidationError::excluded_packages(vec![PackageRef::new(
            "com.example.legacyforum",
            "Legacy Forum",
            "1.2.0",
        )]));
    }
    Ok(())
}

fn main() {
    let reporter = ErrorReporter::new();
    let catalog = MessageCatalog::english();

    println!("--- Basic Usage Example ---\n");

    match inspect_archive("/tmp/forum.tar") {
        Ok(()) => println!("Archive is valid"),
        Err(err) => {
            // What the administrator sees in the installer UI
            println!("1. [LOCALIZED] {}", err.error_message(&catalog));

            // What old callers matching on the generic message see
            println!("2. [LEGACY]    {}", err);

            // Validation failures are expected and stay out of the error log
            let logged = reporter.report(&err);
            println!("3. [LOGGED]    {}", logged);
        }
    }

    // Faults still go to the log
    let fault = SystemError::new(500, "package cache is not writable");
    reporter.report(&fault);
    println!("\nError log holds {} entries", reporter.log().len());
}
