impl Post {
    pub fn headline(&self) -> String {
        format!("{} ({} views)", self.title, self.views)
    }
}

impl docmodel::Model for Post {
    fn collection_name(&self) -> &'static str {
        "articles"
    }
}

impl docmodel::Model for Author {
    fn queried(&mut self) -> docmodel::Result<()> {
        self.events.push("queried".to_string());
        Ok(())
    }

    fn creating(&mut self) -> docmodel::Result<()> {
        if self.name.trim().is_empty() {
            docmodel::bail!("author name is empty");
        }
        self.events.push("creating".to_string());
        Ok(())
    }

    fn created(&mut self) -> docmodel::Result<()> {
        self.events.push("created".to_string());
        Ok(())
    }

    fn saving(&mut self) -> docmodel::Result<()> {
        self.events.push("saving".to_string());
        Ok(())
    }

    fn saved(&mut self) -> docmodel::Result<()> {
        self.events.push("saved".to_string());
        Ok(())
    }

    fn updating(&mut self) -> docmodel::Result<()> {
        self.events.push("updating".to_string());
        Ok(())
    }

    fn updated(&mut self) -> docmodel::Result<()> {
        self.events.push("updated".to_string());
        Ok(())
    }

    fn deleting(&mut self) -> docmodel::Result<()> {
        self.events.push("deleting".to_string());
        Ok(())
    }

    fn deleted(&mut self) -> docmodel::Result<()> {
        self.events.push("deleted".to_string());
        Ok(())
    }
}
