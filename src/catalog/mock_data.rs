use crate::models::{CarouselSection, Content, ContentType};

const IMAGE_HOST: &str = "https://images.pexels.com/photos";

fn image(photo_id: u32, width: u32, height: u32) -> String {
    format!(
        "{IMAGE_HOST}/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w={width}&h={height}"
    )
}

#[allow(clippy::too_many_arguments)]
fn title(
    id: &str,
    name: &str,
    description: &str,
    photo_id: u32,
    year: i32,
    rating: &str,
    duration: &str,
    genres: &[&str],
    content_type: ContentType,
) -> Content {
    let mut content = Content::new(id, name, content_type)
        .with_description(description)
        .with_release(year, rating)
        .with_genres(genres.iter().copied());
    content.thumbnail = image(photo_id, 300, 400);
    content.backdrop = image(photo_id, 1920, 1080);
    content.duration = duration.to_string();
    content
}

pub fn featured() -> Content {
    let mut content = title(
        "featured-1",
        "Stranger Things",
        "When a young boy vanishes, a small town uncovers a mystery involving secret experiments, terrifying supernatural forces, and one strange little girl.",
        7991579,
        2016,
        "TV-14",
        "4 Seasons",
        &["Sci-Fi", "Horror", "Drama"],
        ContentType::Series,
    );
    content.featured = true;
    content
}

fn continue_watching() -> Vec<Content> {
    vec![
        title(
            "cw-1",
            "The Crown",
            "Follows the political rivalries and romance of Queen Elizabeth II's reign.",
            7991232,
            2016,
            "TV-MA",
            "6 Seasons",
            &["Drama", "History"],
            ContentType::Series,
        ),
        title(
            "cw-2",
            "Inception",
            "A thief who steals corporate secrets through dream-sharing technology.",
            7991360,
            2010,
            "PG-13",
            "2h 28m",
            &["Action", "Sci-Fi", "Thriller"],
            ContentType::Movie,
        ),
        title(
            "cw-3",
            "Breaking Bad",
            "A high school chemistry teacher turned methamphetamine manufacturer.",
            7991647,
            2008,
            "TV-MA",
            "5 Seasons",
            &["Crime", "Drama", "Thriller"],
            ContentType::Series,
        ),
    ]
}

fn trending() -> Vec<Content> {
    vec![
        title(
            "t-1",
            "The Witcher",
            "Geralt of Rivia, a solitary monster hunter, struggles to find his place.",
            7991471,
            2019,
            "TV-MA",
            "3 Seasons",
            &["Fantasy", "Adventure", "Action"],
            ContentType::Series,
        ),
        title(
            "t-2",
            "Dune",
            "Paul Atreides leads nomadic tribes in a revolt against House Harkonnen.",
            7991504,
            2021,
            "PG-13",
            "2h 35m",
            &["Sci-Fi", "Adventure", "Drama"],
            ContentType::Movie,
        ),
        title(
            "t-3",
            "Wednesday",
            "Wednesday Addams navigates her years as a student at Nevermore Academy.",
            7991395,
            2022,
            "TV-14",
            "1 Season",
            &["Comedy", "Horror", "Mystery"],
            ContentType::Series,
        ),
        title(
            "t-4",
            "Avatar",
            "A marine on an alien planet becomes torn between following orders.",
            7991683,
            2009,
            "PG-13",
            "2h 42m",
            &["Action", "Adventure", "Fantasy"],
            ContentType::Movie,
        ),
        title(
            "t-5",
            "The Mandalorian",
            "A lone gunfighter makes his way through the outer reaches of the galaxy.",
            7991765,
            2019,
            "TV-14",
            "3 Seasons",
            &["Action", "Adventure", "Sci-Fi"],
            ContentType::Series,
        ),
    ]
}

fn movies() -> Vec<Content> {
    vec![
        title(
            "m-1",
            "Interstellar",
            "A team of explorers travel through a wormhole in space.",
            7991234,
            2014,
            "PG-13",
            "2h 49m",
            &["Drama", "Sci-Fi", "Thriller"],
            ContentType::Movie,
        ),
        title(
            "m-2",
            "The Dark Knight",
            "Batman faces the Joker, a criminal mastermind who wants to plunge Gotham into anarchy.",
            7991789,
            2008,
            "PG-13",
            "2h 32m",
            &["Action", "Crime", "Drama"],
            ContentType::Movie,
        ),
        title(
            "m-3",
            "Blade Runner 2049",
            "A young blade runner discovers a secret that could plunge society into chaos.",
            7991456,
            2017,
            "R",
            "2h 44m",
            &["Drama", "Mystery", "Sci-Fi"],
            ContentType::Movie,
        ),
        title(
            "m-4",
            "Mad Max: Fury Road",
            "In a post-apocalyptic wasteland, Max teams up with a mysterious woman.",
            7991623,
            2015,
            "R",
            "2h 0m",
            &["Action", "Adventure", "Sci-Fi"],
            ContentType::Movie,
        ),
    ]
}

fn tv_shows() -> Vec<Content> {
    vec![
        title(
            "tv-1",
            "House of the Dragon",
            "The Targaryen civil war, known as the Dance of the Dragons.",
            7991567,
            2022,
            "TV-MA",
            "2 Seasons",
            &["Action", "Adventure", "Drama"],
            ContentType::Series,
        ),
        title(
            "tv-2",
            "The Bear",
            "A young chef from the fine dining world returns to Chicago to run his family restaurant.",
            7991345,
            2022,
            "TV-MA",
            "3 Seasons",
            &["Comedy", "Drama"],
            ContentType::Series,
        ),
        title(
            "tv-3",
            "Euphoria",
            "A group of high school students navigate love and friendships.",
            7991412,
            2019,
            "TV-MA",
            "2 Seasons",
            &["Drama"],
            ContentType::Series,
        ),
    ]
}

pub fn sections() -> Vec<CarouselSection> {
    let section = |id: &str, title: &str, content: Vec<Content>| CarouselSection {
        id: id.to_string(),
        title: title.to_string(),
        content,
    };

    vec![
        section("continue-watching", "Continue Watching", continue_watching()),
        section("trending", "Trending Now", trending()),
        section("movies", "Popular Movies", movies()),
        section("tv-shows", "TV Shows", tv_shows()),
    ]
}
