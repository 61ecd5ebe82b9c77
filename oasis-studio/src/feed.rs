use std::sync::Arc;

use chrono::Utc;
use log::info;
use oasis_core::time_based_id;
use url::Url;

use crate::{
    util::is_blank, AuthorSnapshot, BlogPost, Comment, Persisted, Storage, StorageError,
    StorageKey, StoreError, UserData,
};

/// The studio blog, newest post first
pub struct Feed {
    posts: Persisted<Vec<BlogPost>>,
}

/// A post as written by a user
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub content: String,
    pub image: Option<String>,
}

impl Feed {
    pub fn new(storage: &Arc<dyn Storage>) -> Result<Self, StorageError> {
        Ok(Self {
            posts: Persisted::load(storage, StorageKey::Posts, vec![welcome_post()])?,
        })
    }

    pub fn list(&self) -> Vec<BlogPost> {
        self.posts.get()
    }

    pub fn get(&self, id: &str) -> Option<BlogPost> {
        self.posts
            .read(|posts| posts.iter().find(|p| p.id == id).cloned())
    }

    /// Publishes a post at the top of the feed
    pub fn add_post(&self, actor: &UserData, new_post: NewPost) -> Result<BlogPost, StoreError> {
        if is_blank(&new_post.content) {
            return Err(StoreError::Validation(
                "O conteúdo da publicação não pode estar vazio.".to_string(),
            ));
        }

        let image = new_post.image.filter(|i| !is_blank(i));

        if let Some(image) = &image {
            Url::parse(image)
                .map_err(|e| StoreError::Validation(format!("Invalid image URL: {}", e)))?;
        }

        let title = Some(new_post.title)
            .filter(|t| !is_blank(t))
            .unwrap_or_else(|| "Sem título".to_string());

        let category = Some(new_post.category)
            .filter(|c| !is_blank(c))
            .unwrap_or_else(|| "Novidades".to_string());

        let post = BlogPost {
            id: time_based_id(),
            title,
            category,
            content: new_post.content,
            image,
            date: Utc::now(),
            liked_by: Default::default(),
            comments: vec![],
            author: actor.into(),
        };

        self.posts.update(|posts| posts.insert(0, post.clone()))?;

        info!("{} published post {}", actor.username, post.id);
        Ok(post)
    }

    /// Deletes a post if the actor wrote it or is an administrator.
    /// Returns false if nothing was deleted.
    pub fn delete_post(&self, actor: &UserData, id: &str) -> Result<bool, StoreError> {
        let deleted = self.posts.update_if(|posts| {
            let index = posts
                .iter()
                .position(|p| p.id == id && (actor.is_admin || p.author.id == actor.id))?;

            Some(posts.remove(index))
        })?;

        if let Some(post) = &deleted {
            info!("{} deleted post {}", actor.username, post.id);
        }

        Ok(deleted.is_some())
    }

    /// Likes the post, or removes the like if it was already there
    pub fn toggle_like(&self, actor: &UserData, id: &str) -> Result<Option<BlogPost>, StoreError> {
        let post = self.posts.update_if(|posts| {
            let post = posts.iter_mut().find(|p| p.id == id)?;

            if !post.liked_by.remove(&actor.id) {
                post.liked_by.insert(actor.id.clone());
            }

            Some(post.clone())
        })?;

        Ok(post)
    }

    pub fn add_comment(
        &self,
        actor: &UserData,
        id: &str,
        text: String,
    ) -> Result<Option<Comment>, StoreError> {
        if is_blank(&text) {
            return Err(StoreError::Validation(
                "O comentário não pode estar vazio.".to_string(),
            ));
        }

        let comment = Comment {
            id: time_based_id(),
            content: text,
            date: Utc::now(),
            author: actor.into(),
        };

        let added = self.posts.update_if(|posts| {
            let post = posts.iter_mut().find(|p| p.id == id)?;
            post.comments.push(comment.clone());

            Some(comment)
        })?;

        Ok(added)
    }
}

fn welcome_post() -> BlogPost {
    BlogPost {
        id: "1".to_string(),
        title: "Sem título".to_string(),
        category: "Novidades".to_string(),
        content: "Estamos muito animados com o progresso das obras da nova piscina! Em breve, aulas de Hidroginástica para todas as idades. 🏊‍♂️ #OasisCT #Novidades".to_string(),
        image: None,
        date: Utc::now(),
        liked_by: Default::default(),
        comments: vec![],
        author: AuthorSnapshot::studio(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test_user, MemoryStorage};

    fn feed() -> (Feed, Arc<dyn Storage>) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        (Feed::new(&storage).unwrap(), storage)
    }

    fn new_post(content: &str) -> NewPost {
        NewPost {
            title: "Aulão de sábado".to_string(),
            category: "Eventos".to_string(),
            content: content.to_string(),
            image: None,
        }
    }

    #[test]
    fn starts_with_the_welcome_post() {
        let (feed, _) = feed();
        let posts = feed.list();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "1");
        assert!(posts[0].author.is_admin);
    }

    #[test]
    fn added_posts_are_listed_first() {
        let (feed, storage) = feed();
        let ana = test_user("ana", false);

        let post = feed.add_post(&ana, new_post("Venham todos!")).unwrap();
        let posts = Feed::new(&storage).unwrap().list();
        let listed = &posts[0];

        assert_eq!(listed.id, post.id);
        assert_eq!(listed.title, "Aulão de sábado");
        assert_eq!(listed.category, "Eventos");
        assert_eq!(listed.content, "Venham todos!");
        assert_eq!(listed.author.id, ana.id);
        assert_eq!(listed.author.name, ana.name);
        assert!(listed.liked_by.is_empty());
        assert!(listed.comments.is_empty());
    }

    #[test]
    fn blank_title_and_category_get_defaults() {
        let (feed, _) = feed();
        let ana = test_user("ana", false);

        let post = feed
            .add_post(
                &ana,
                NewPost {
                    title: " ".to_string(),
                    category: String::new(),
                    content: "Bom dia".to_string(),
                    image: None,
                },
            )
            .unwrap();

        assert_eq!(post.title, "Sem título");
        assert_eq!(post.category, "Novidades");
    }

    #[test]
    fn invalid_posts_are_rejected() {
        let (feed, _) = feed();
        let ana = test_user("ana", false);

        assert!(matches!(
            feed.add_post(&ana, new_post("   ")),
            Err(StoreError::Validation(_))
        ));

        let mut with_image = new_post("Foto");
        with_image.image = Some("not a url".to_string());
        assert!(feed.add_post(&ana, with_image).is_err());

        let mut with_data_url = new_post("Foto");
        with_data_url.image = Some("data:image/jpeg;base64,/9j/4AAQ".to_string());
        assert!(feed.add_post(&ana, with_data_url).is_ok());
    }

    #[test]
    fn toggling_a_like_twice_restores_the_likes() {
        let (feed, _) = feed();
        let ana = test_user("ana", false);
        let before = feed.get("1").unwrap().liked_by;

        let liked = feed.toggle_like(&ana, "1").unwrap().unwrap();
        assert!(liked.liked_by.contains(&ana.id));

        let unliked = feed.toggle_like(&ana, "1").unwrap().unwrap();
        assert_eq!(unliked.liked_by, before);

        assert!(feed.toggle_like(&ana, "missing").unwrap().is_none());
    }

    #[test]
    fn only_the_author_or_an_admin_can_delete() {
        let (feed, _) = feed();
        let ana = test_user("ana", false);
        let bruno = test_user("bruno", false);
        let admin = test_user("admoasis", true);

        let post = feed.add_post(&ana, new_post("Meu post")).unwrap();
        let before: Vec<_> = feed.list().into_iter().map(|p| p.id).collect();

        assert!(!feed.delete_post(&bruno, &post.id).unwrap());
        assert!(!feed.delete_post(&bruno, "1").unwrap());

        let after: Vec<_> = feed.list().into_iter().map(|p| p.id).collect();
        assert_eq!(before, after);

        assert!(feed.delete_post(&ana, &post.id).unwrap());
        assert!(feed.delete_post(&admin, "1").unwrap());
        assert!(feed.list().is_empty());
    }

    #[test]
    fn comments_are_appended_with_a_snapshot() {
        let (feed, _) = feed();
        let ana = test_user("ana", false);
        let bruno = test_user("bruno", false);

        feed.add_comment(&ana, "1", "Que demais!".to_string())
            .unwrap()
            .unwrap();
        feed.add_comment(&bruno, "1", "Mal posso esperar".to_string())
            .unwrap()
            .unwrap();

        let comments = feed.get("1").unwrap().comments;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author.name, ana.name);
        assert_eq!(comments[1].content, "Mal posso esperar");

        assert!(feed
            .add_comment(&ana, "missing", "Oi".to_string())
            .unwrap()
            .is_none());
    }
}
