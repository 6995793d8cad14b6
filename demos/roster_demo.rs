//! Demo showcasing bulk loading, editing and teardown of a roster.

use social_roster::loader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let content = "username,password,friend1,friend2,friend3,posts
Zoe,password1,adam, ,Bob,first post,second post
adam,password2,zoe,,,hello
bob,short,zoe
";

    let (mut directory, report) = loader::parse_str(content, Some(3))?;

    println!("=== Load Report ===");
    println!("Rows read: {}", report.rows);
    println!("Registered: {}", report.registered);
    println!("Rejected: {}", report.rejected);

    println!("\n=== Directory ===");
    print!("{directory}");

    println!("=== Editing ===");
    directory.add_friend("zoe", "carol")?;
    directory.add_post("ZOE", "third post")?;
    if let Err(err) = directory.delete_friend("zoe", "mallory") {
        println!("Expected rejection: {err}");
    }

    println!("\n=== Zoe's posts, two per page ===");
    for (i, page) in directory.list_posts("zoe", 2)?.enumerate() {
        println!("Page {}:", i + 1);
        for post in page {
            println!("{post}");
        }
    }

    let released = directory.teardown();
    println!(
        "\nReleased {} users, {} friends, {} posts",
        released.users, released.friends, released.posts
    );
    Ok(())
}
