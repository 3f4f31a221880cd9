use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use student_api::Student;

#[derive(Parser)]
#[command(name = "student-cli")]
#[command(about = "Command-line client for the student records API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every student
    List,
    /// Show the student with the given id
    Get { id: u32 },
    /// Find a student by name (case-insensitive)
    FindName { name: String },
    /// Find a student by age and name
    FindAge { age: i64, name: String },
    /// Create a student
    Create(StudentFields),
    /// Replace every field of a student
    Replace {
        id: u32,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Update only the given fields of a student
    Patch {
        id: u32,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student
    Delete { id: u32 },
}

#[derive(Args)]
struct StudentFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<i64>,
    #[arg(long)]
    year: Option<String>,
}

impl From<StudentFields> for Student {
    fn from(fields: StudentFields) -> Self {
        Student {
            name: fields.name,
            age: fields.age,
            year: fields.year,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::List => client.get(format!("{}/students", base)),
        Commands::Get { id } => client.get(format!("{}/students/{}", base, id)),
        Commands::FindName { name } => client
            .get(format!("{}/students/name", base))
            .query(&[("name", name)]),
        Commands::FindAge { age, name } => client
            .get(format!("{}/students/age/{}", base, age))
            .query(&[("name", name)]),
        Commands::Create(fields) => client
            .post(format!("{}/student", base))
            .json(&Student::from(fields)),
        Commands::Replace { id, fields } => client
            .put(format!("{}/student/{}", base, id))
            .json(&Student::from(fields)),
        Commands::Patch { id, fields } => client
            .patch(format!("{}/student/{}", base, id))
            .json(&Student::from(fields)),
        Commands::Delete { id } => client.delete(format!("{}/student/{}", base, id)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
