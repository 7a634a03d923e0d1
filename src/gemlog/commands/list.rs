use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Location, Post};
use crate::store::PostStore;

/// Reads every post in a location, sorted by filename.
pub fn posts_in<S: PostStore>(store: &S, location: Location) -> Result<Vec<Post>> {
    store
        .list_filenames(location)?
        .into_iter()
        .map(|filename| {
            let content = store.read(location, &filename)?;
            Ok(Post::from_content(filename, location, &content))
        })
        .collect()
}

pub fn run<S: PostStore>(store: &S, drafts_only: bool) -> Result<CmdResult> {
    let location = if drafts_only {
        Location::Drafts
    } else {
        Location::Published
    };
    Ok(CmdResult::default().with_listed_posts(posts_in(store, location)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use chrono::NaiveDate;
    use crate::store::memory::InMemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn lists_published_by_default() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, "Public", false, day(1)).unwrap();
        create::run(&mut store, "Private", true, day(1)).unwrap();

        let result = run(&store, false).unwrap();
        assert_eq!(result.listed_posts.len(), 1);
        assert_eq!(result.listed_posts[0].title, "Public");
        assert_eq!(result.listed_posts[0].location, Location::Published);
    }

    #[test]
    fn created_draft_titles_appear_in_draft_listing() {
        let titles = ["Hello, World!", "C# for Rustaceans", "  spaced  ", "Émile's notes"];
        let mut store = InMemoryStore::new();
        for title in titles {
            create::run(&mut store, title, true, day(2)).unwrap();
        }

        let listed = run(&store, true).unwrap().listed_posts;
        for title in titles {
            assert!(
                listed.iter().any(|p| p.title == title),
                "missing {title:?} in {listed:?}"
            );
        }
    }

    #[test]
    fn listing_is_sorted_by_filename() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, "B", false, day(2)).unwrap();
        create::run(&mut store, "A", false, day(1)).unwrap();
        create::run(&mut store, "C", false, day(1)).unwrap();

        let names: Vec<_> = run(&store, false)
            .unwrap()
            .listed_posts
            .into_iter()
            .map(|p| p.filename)
            .collect();
        assert_eq!(
            names,
            vec!["2024-01-01-a.gmi", "2024-01-01-c.gmi", "2024-01-02-b.gmi"]
        );
    }

    #[test]
    fn title_comes_from_file_not_filename() {
        let mut store = InMemoryStore::new();
        store
            .write_new(Location::Published, "2024-01-01-old-name.gmi", "# Renamed Inside\n")
            .unwrap();

        let listed = run(&store, false).unwrap().listed_posts;
        assert_eq!(listed[0].title, "Renamed Inside");
    }
}
